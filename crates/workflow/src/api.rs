use crate::draft::{DraftSnapshot, WorkflowKind};
use lexportal_db_schema_file::enums::PaymentMethod;
use lexportal_utils::error::{PortalError, PortalErrorType, PortalResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Start paying for a document review. The complete draft rides along so
/// the server can stage it before any redirect happens.
pub struct CreatePayment {
  pub method: PaymentMethod,
  pub draft: DraftSnapshot,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "flow", rename_all = "snake_case")]
pub enum CreatePaymentResponse {
  /// Card: the client confirms the intent in place using the client key.
  Intent {
    #[serde(rename = "paymentIntentId")]
    payment_intent_id: String,
    #[serde(rename = "clientKey")]
    client_key: String,
  },
  /// E-wallets: the client is sent to the processor's checkout page.
  Redirect {
    #[serde(rename = "sourceId")]
    source_id: String,
    #[serde(rename = "checkoutUrl")]
    checkout_url: String,
  },
}

/// A payment request whose draft has been proven complete. Money never
/// moves for a draft that could still fail validation afterwards.
#[derive(Debug, Clone)]
pub struct ValidCreatePayment(pub CreatePayment);

impl TryFrom<CreatePayment> for ValidCreatePayment {
  type Error = PortalError;

  fn try_from(value: CreatePayment) -> Result<Self, Self::Error> {
    if value.draft.kind != WorkflowKind::DocumentReview {
      return Err(PortalErrorType::InvalidPaymentRequest.into());
    }
    value.draft.ensure_complete()?;
    Ok(ValidCreatePayment(value))
  }
}

impl ValidCreatePayment {
  pub fn amount_pesos(&self) -> f64 {
    self.0.draft.kind.fee_pesos()
  }
}

pub fn payment_description(kind: WorkflowKind) -> PortalResult<&'static str> {
  match kind {
    WorkflowKind::DocumentReview => Ok("Document Review Service"),
    WorkflowKind::Consultation => Err(PortalErrorType::InvalidPaymentRequest.into()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::draft::{DraftFields, SubmissionDraft};
  use lexportal_db_schema::newtypes::LocalUserId;
  use lexportal_db_schema_file::enums::DocumentType;
  use lexportal_db_views_submission::api::UploadedDocument;
  use pretty_assertions::assert_eq;

  fn complete_draft() -> DraftSnapshot {
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

  #[test]
  fn test_payment_requires_complete_draft() {
    let mut incomplete = complete_draft();
    incomplete.fields.document = None;
    let request = CreatePayment {
      method: PaymentMethod::Gcash,
      draft: incomplete,
    };
    assert!(ValidCreatePayment::try_from(request).is_err());

    let request = CreatePayment {
      method: PaymentMethod::Gcash,
      draft: complete_draft(),
    };
    let valid = ValidCreatePayment::try_from(request).expect("complete draft pays");
    assert_eq!(500.0, valid.amount_pesos());
  }

  #[test]
  fn test_free_workflow_never_pays() {
    let mut draft = complete_draft();
    draft.kind = WorkflowKind::Consultation;
    let request = CreatePayment {
      method: PaymentMethod::Card,
      draft,
    };
    assert!(ValidCreatePayment::try_from(request).is_err());
    assert!(payment_description(WorkflowKind::Consultation).is_err());
  }

  #[test]
  fn test_response_wire_shape() {
    let response = CreatePaymentResponse::Redirect {
      source_id: "src_1".to_string(),
      checkout_url: "https://checkout.paymongo.com/src_1".to_string(),
    };
    let json = serde_json::to_value(&response).expect("serialize response");
    assert_eq!("redirect", json["flow"]);
    assert_eq!("https://checkout.paymongo.com/src_1", json["checkoutUrl"]);
  }
}
