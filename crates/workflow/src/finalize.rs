//! Turning a complete draft into a stored record. Consultations finalize
//! directly; document reviews only after the gateway itself reports the
//! payment succeeded. Both the card flow and the webhook flow funnel into
//! [`finalize_document_review`], so the idempotency guarantee holds no
//! matter which one runs first, or whether both do.
use crate::draft::{DraftSnapshot, WorkflowKind};
use lexportal_api_utils::{
  context::PortalContext,
  notify::{notify_consultation_received, notify_document_review_received},
};
use lexportal_db_schema::{
  newtypes::LocalUserId,
  source::{
    consultation::{Consultation, ConsultationDocument, ConsultationDocumentInsertForm, ConsultationInsertForm},
    document_review::{DocumentReview, DocumentReviewInsertForm},
  },
  traits::Crud,
};
use lexportal_db_schema_file::enums::PaymentMethod;
use lexportal_db_views_submission::{ConsultationView, SubmissionRecord};
use lexportal_payment::{PaymentStatus, PaymongoClient};
use lexportal_utils::error::{PortalErrorType, PortalResult};

/// How the finalizer asks the gateway whether a payment really went
/// through. The production impl is the PayMongo client; tests stub it.
pub trait PaymentStatusProbe {
  fn status(
    &self,
    payment_id: &str,
  ) -> impl std::future::Future<Output = PortalResult<PaymentStatus>> + Send;
}

impl PaymentStatusProbe for PaymongoClient {
  async fn status(&self, payment_id: &str) -> PortalResult<PaymentStatus> {
    self.retrieve_status(payment_id).await
  }
}

/// The payment a caller claims to have made. Nothing in here is trusted
/// until the probe confirms it.
#[derive(Debug, Clone)]
pub struct PaidWith {
  pub payment_id: String,
  pub method: PaymentMethod,
}

/// Confirm against the gateway, not the caller. Anything short of
/// succeeded refuses finalization; a still-processing payment comes back
/// later through the webhook.
pub async fn verify_payment<P: PaymentStatusProbe>(
  probe: &P,
  payment_id: &str,
) -> PortalResult<()> {
  match probe.status(payment_id).await? {
    PaymentStatus::Succeeded => Ok(()),
    status => {
      tracing::info!("Refusing finalization, payment {payment_id} is {status:?}");
      Err(PortalErrorType::PaymentNotConfirmed.into())
    }
  }
}

pub async fn finalize_consultation(
  context: &PortalContext,
  owner_id: LocalUserId,
  snapshot: DraftSnapshot,
) -> PortalResult<ConsultationView> {
  if snapshot.kind != WorkflowKind::Consultation {
    return Err(PortalErrorType::InvalidField("not a consultation draft".to_string()).into());
  }
  snapshot.ensure_complete()?;

  let fields = snapshot.fields;
  let mut form = ConsultationInsertForm::new(
    owner_id,
    fields.name,
    fields.email,
    fields.phone,
    fields.inquiry,
  );
  form.company_name = fields.company_name;
  let consultation = Consultation::create(&mut context.pool(), &form).await?;

  let document_forms = fields
    .documents
    .into_iter()
    .map(|d| {
      ConsultationDocumentInsertForm::new(consultation.id, d.name, d.url, d.content_type, d.size)
    })
    .collect::<Vec<_>>();
  let documents = ConsultationDocument::create_many(&mut context.pool(), &document_forms).await?;

  let view = ConsultationView {
    consultation: consultation.clone(),
    documents,
  };
  context
    .subscriptions()
    .publish(&SubmissionRecord::Consultation(view.clone()));
  notify_consultation_received(consultation, context);
  Ok(view)
}

/// Returns the record and whether this call created it. A replay, a
/// concurrent webhook, or a double-submitted form all get the same row
/// back with `created == false`.
pub async fn finalize_document_review<P: PaymentStatusProbe>(
  context: &PortalContext,
  probe: &P,
  owner_id: LocalUserId,
  snapshot: DraftSnapshot,
  paid_with: PaidWith,
) -> PortalResult<(DocumentReview, bool)> {
  snapshot.ensure_complete()?;
  let form = document_review_form(owner_id, snapshot, &paid_with)?;
  verify_payment(probe, &paid_with.payment_id).await?;

  let (review, created) =
    DocumentReview::create_idempotent(&mut context.pool(), &form).await?;
  if created {
    context.subscriptions().publish(&SubmissionRecord::DocumentReview {
      document_review: review.clone(),
    });
    notify_document_review_received(review.clone(), context);
  } else {
    tracing::info!(
      "Payment {} already finalized as document review {}",
      review.payment_id,
      review.id
    );
  }
  Ok((review, created))
}

/// Build the insert form up front so a malformed snapshot fails before we
/// spend a gateway round trip on it.
fn document_review_form(
  owner_id: LocalUserId,
  snapshot: DraftSnapshot,
  paid_with: &PaidWith,
) -> PortalResult<DocumentReviewInsertForm> {
  if snapshot.kind != WorkflowKind::DocumentReview {
    return Err(PortalErrorType::InvalidField("not a document review draft".to_string()).into());
  }
  let fields = snapshot.fields;
  let document_type = fields
    .document_type
    .ok_or(PortalErrorType::InvalidDocumentType)?;
  let document = fields.document.ok_or(PortalErrorType::DocumentRequired)?;

  let mut form = DocumentReviewInsertForm::new(
    owner_id,
    fields.name,
    fields.email,
    document_type,
    document.name,
    document.url,
    document.content_type,
    document.size,
    true,
    paid_with.payment_id.clone(),
    WorkflowKind::DocumentReview.fee_pesos(),
    paid_with.method,
  );
  form.phone = (!fields.phone.is_empty()).then_some(fields.phone);
  form.additional_details = fields.additional_details;
  Ok(form)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::draft::{DraftFields, SubmissionDraft};
  use lexportal_db_schema_file::enums::DocumentType;
  use lexportal_db_views_submission::api::UploadedDocument;
  use pretty_assertions::assert_eq;
  use std::sync::atomic::{AtomicUsize, Ordering};

  struct StubProbe {
    status: PaymentStatus,
    calls: AtomicUsize,
  }

  impl StubProbe {
    fn new(status: PaymentStatus) -> Self {
      Self {
        status,
        calls: AtomicUsize::new(0),
      }
    }
  }

  impl PaymentStatusProbe for StubProbe {
    async fn status(&self, _payment_id: &str) -> PortalResult<PaymentStatus> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      Ok(self.status)
    }
  }

  fn complete_review_snapshot() -> DraftSnapshot {
    let mut draft = SubmissionDraft::new(LocalUserId(7), WorkflowKind::DocumentReview);
    draft.fields = DraftFields {
      name: "Maria Santos".to_string(),
      email: "maria@example.com".to_string(),
      privacy_consent: true,
      document_type: Some(DocumentType::Lease),
      document: Some(UploadedDocument {
        name: "lease.pdf".to_string(),
        url: "/files/document-review/7/abc-lease.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        size: 50_000,
      }),
      ..Default::default()
    };
    draft.snapshot()
  }

  #[tokio::test]
  async fn test_verify_payment_requires_succeeded() {
    for status in [
      PaymentStatus::Created,
      PaymentStatus::AwaitingConfirmation,
      PaymentStatus::Failed,
    ] {
      let probe = StubProbe::new(status);
      let err = verify_payment(&probe, "pay_1").await.expect_err("must refuse");
      assert_eq!(PortalErrorType::PaymentNotConfirmed, err.error_type);
    }

    let probe = StubProbe::new(PaymentStatus::Succeeded);
    verify_payment(&probe, "pay_1").await.expect("succeeded passes");
    assert_eq!(1, probe.calls.load(Ordering::SeqCst));
  }

  #[test]
  fn test_form_carries_fee_and_payment_identity() {
    let paid_with = PaidWith {
      payment_id: "pay_abc".to_string(),
      method: PaymentMethod::Gcash,
    };
    let form = document_review_form(LocalUserId(7), complete_review_snapshot(), &paid_with)
      .expect("build form");
    assert_eq!(500.0, form.payment_amount);
    assert_eq!("pay_abc", form.payment_id);
    assert!(form.paid);
    assert_eq!(None, form.phone);
  }

  #[test]
  fn test_form_refuses_missing_document() {
    let mut snapshot = complete_review_snapshot();
    snapshot.fields.document = None;
    let paid_with = PaidWith {
      payment_id: "pay_abc".to_string(),
      method: PaymentMethod::Card,
    };
    let err = document_review_form(LocalUserId(7), snapshot, &paid_with)
      .expect_err("no document, no record");
    assert_eq!(PortalErrorType::DocumentRequired, err.error_type);
  }

  #[test]
  fn test_form_refuses_wrong_workflow() {
    let mut snapshot = complete_review_snapshot();
    snapshot.kind = WorkflowKind::Consultation;
    let paid_with = PaidWith {
      payment_id: "pay_abc".to_string(),
      method: PaymentMethod::Card,
    };
    assert!(document_review_form(LocalUserId(7), snapshot, &paid_with).is_err());
  }
}
