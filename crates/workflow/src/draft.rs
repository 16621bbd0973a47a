//! The multi-step draft a client walks through before a submission
//! exists. The draft is pure state, nothing here touches the database or
//! the payment gateway; finalization happens in [`crate::finalize`].
use lexportal_db_schema::newtypes::LocalUserId;
use lexportal_db_schema_file::enums::DocumentType;
use lexportal_db_views_submission::{
  api::UploadedDocument,
  validator::{
    check_privacy_consent,
    check_uploaded_document,
    ValidCreateConsultation,
    ValidCreateDocumentReview,
  },
};
use lexportal_utils::{
  error::{PortalErrorExt, PortalErrorType, PortalResult},
  utils::validation::{
    additional_details_length_check,
    inquiry_length_check,
    is_valid_client_name,
    is_valid_email_address,
    is_valid_phone_number,
  },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
  /// Free, four steps: contact, inquiry, attachments, review.
  Consultation,
  /// Paid, five steps: contact, document details, upload, payment, review.
  DocumentReview,
}

impl WorkflowKind {
  pub fn step_count(&self) -> u8 {
    match self {
      WorkflowKind::Consultation => 4,
      WorkflowKind::DocumentReview => 5,
    }
  }

  /// Flat service fee in pesos. Zero means no payment gate.
  pub fn fee_pesos(&self) -> f64 {
    match self {
      WorkflowKind::Consultation => 0.0,
      WorkflowKind::DocumentReview => 500.0,
    }
  }
}

/// Everything a client can type or attach during a draft. All fields
/// optional at rest; the step machine decides what must be present when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DraftFields {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub company_name: Option<String>,
  pub inquiry: String,
  pub document_type: Option<DocumentType>,
  pub additional_details: Option<String>,
  pub privacy_consent: bool,
  /// Consultation attachments, optional.
  pub documents: Vec<UploadedDocument>,
  /// The document under review, required before the payment step.
  pub document: Option<UploadedDocument>,
}

/// A draft mid-flight. Steps are 1-based; `advance` validates the fields
/// belonging to the step being left, `retreat` never validates and never
/// loses data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
  pub owner_id: LocalUserId,
  pub kind: WorkflowKind,
  current_step: u8,
  pub fields: DraftFields,
}

impl SubmissionDraft {
  pub fn new(owner_id: LocalUserId, kind: WorkflowKind) -> Self {
    Self {
      owner_id,
      kind,
      current_step: 1,
      fields: DraftFields::default(),
    }
  }

  pub fn current_step(&self) -> u8 {
    self.current_step
  }

  pub fn advance(&mut self) -> PortalResult<()> {
    if self.current_step >= self.kind.step_count() {
      return Err(PortalErrorType::InvalidStep.into());
    }
    self.validate_step(self.current_step)?;
    self.current_step += 1;
    Ok(())
  }

  /// Moving back is always legal; at the first step it is a no-op.
  pub fn retreat(&mut self) {
    self.current_step = self.current_step.saturating_sub(1).max(1);
  }

  /// Validate the fields a single step is responsible for.
  fn validate_step(&self, step: u8) -> PortalResult<()> {
    match (self.kind, step) {
      (_, 1) => self.validate_contact(),
      (WorkflowKind::Consultation, 2) => inquiry_length_check(&self.fields.inquiry),
      (WorkflowKind::Consultation, 3) => {
        for document in &self.fields.documents {
          check_uploaded_document(document)?;
        }
        Ok(())
      }
      (WorkflowKind::DocumentReview, 2) => {
        if self.fields.document_type.is_none() {
          return Err(PortalErrorType::InvalidDocumentType.into());
        }
        if let Some(details) = &self.fields.additional_details {
          additional_details_length_check(details)?;
        }
        Ok(())
      }
      (WorkflowKind::DocumentReview, 3) => {
        let document = self
          .fields
          .document
          .as_ref()
          .ok_or(PortalErrorType::DocumentRequired)?;
        check_uploaded_document(document)
      }
      // The payment step itself carries no draft fields; whether money
      // actually moved is established at finalization, not here.
      (WorkflowKind::DocumentReview, 4) => Ok(()),
      _ => Ok(()),
    }
  }

  fn validate_contact(&self) -> PortalResult<()> {
    check_privacy_consent(self.fields.privacy_consent)?;
    is_valid_client_name(&self.fields.name)?;
    is_valid_email_address(&self.fields.email)?;
    if self.kind == WorkflowKind::Consultation || !self.fields.phone.is_empty() {
      is_valid_phone_number(&self.fields.phone)?;
    }
    Ok(())
  }

  pub fn snapshot(&self) -> DraftSnapshot {
    DraftSnapshot {
      kind: self.kind,
      fields: self.fields.clone(),
    }
  }

  /// Rehydrate a staged draft at its final step, the position a client
  /// returns to after a payment redirect.
  pub fn resume(owner_id: LocalUserId, snapshot: DraftSnapshot) -> Self {
    Self {
      owner_id,
      current_step: snapshot.kind.step_count(),
      kind: snapshot.kind,
      fields: snapshot.fields,
    }
  }
}

/// The serializable shape of a complete draft, staged as jsonb alongside
/// a redirect payment source and replayed by the webhook receiver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSnapshot {
  pub kind: WorkflowKind,
  pub fields: DraftFields,
}

impl DraftSnapshot {
  /// Run every step's validation. Finalization refuses snapshots that
  /// could not have been walked through the machine legally.
  pub fn ensure_complete(&self) -> PortalResult<()> {
    let draft = SubmissionDraft {
      owner_id: LocalUserId(0),
      kind: self.kind,
      current_step: self.kind.step_count(),
      fields: self.fields.clone(),
    };
    for step in 1..=self.kind.step_count() {
      draft.validate_step(step)?;
    }
    Ok(())
  }

  pub fn to_json(&self) -> PortalResult<serde_json::Value> {
    serde_json::to_value(self).with_portal_type(PortalErrorType::SerializationFailed)
  }

  pub fn from_json(value: serde_json::Value) -> PortalResult<Self> {
    serde_json::from_value(value).with_portal_type(PortalErrorType::InvalidWebhookPayload)
  }
}

impl From<ValidCreateConsultation> for DraftSnapshot {
  fn from(value: ValidCreateConsultation) -> Self {
    let form = value.0;
    DraftSnapshot {
      kind: WorkflowKind::Consultation,
      fields: DraftFields {
        name: form.name,
        email: form.email,
        phone: form.phone,
        company_name: form.company_name,
        inquiry: form.inquiry,
        privacy_consent: form.privacy_consent,
        documents: form.documents,
        ..Default::default()
      },
    }
  }
}

impl From<ValidCreateDocumentReview> for DraftSnapshot {
  fn from(value: ValidCreateDocumentReview) -> Self {
    let form = value.0;
    DraftSnapshot {
      kind: WorkflowKind::DocumentReview,
      fields: DraftFields {
        name: form.name,
        email: form.email,
        phone: form.phone.unwrap_or_default(),
        document_type: Some(form.document_type),
        additional_details: form.additional_details,
        privacy_consent: form.privacy_consent,
        document: Some(form.document),
        ..Default::default()
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn filled_contact(draft: &mut SubmissionDraft) {
    draft.fields.name = "Maria Santos".to_string();
    draft.fields.email = "maria@example.com".to_string();
    draft.fields.phone = "09171234567".to_string();
    draft.fields.privacy_consent = true;
  }

  fn pdf() -> UploadedDocument {
    UploadedDocument {
      name: "lease.pdf".to_string(),
      url: "/files/document-review/7/abc-lease.pdf".to_string(),
      content_type: "application/pdf".to_string(),
      size: 50_000,
    }
  }

  #[test]
  fn test_consent_gates_first_step() {
    let mut draft = SubmissionDraft::new(LocalUserId(1), WorkflowKind::Consultation);
    filled_contact(&mut draft);
    draft.fields.privacy_consent = false;
    assert!(draft.advance().is_err());
    assert_eq!(1, draft.current_step());

    draft.fields.privacy_consent = true;
    draft.advance().expect("advance past contact step");
    assert_eq!(2, draft.current_step());
  }

  #[test]
  fn test_advance_validates_leaving_step_only() {
    let mut draft = SubmissionDraft::new(LocalUserId(1), WorkflowKind::Consultation);
    filled_contact(&mut draft);
    // inquiry still empty, but it belongs to step 2, not step 1
    draft.advance().expect("step 1 does not own the inquiry");

    assert!(draft.advance().is_err());
    draft.fields.inquiry = "Please advise on an early termination clause in our office lease."
      .to_string();
    draft.advance().expect("advance with a real inquiry");
  }

  #[test]
  fn test_retreat_keeps_data_and_stops_at_one() {
    let mut draft = SubmissionDraft::new(LocalUserId(1), WorkflowKind::Consultation);
    filled_contact(&mut draft);
    draft.advance().expect("advance");
    draft.retreat();
    assert_eq!(1, draft.current_step());
    assert_eq!("Maria Santos", draft.fields.name);
    draft.retreat();
    assert_eq!(1, draft.current_step());
    assert_eq!("Maria Santos", draft.fields.name);
  }

  #[test]
  fn test_review_requires_document_before_payment_step() {
    let mut draft = SubmissionDraft::new(LocalUserId(1), WorkflowKind::DocumentReview);
    filled_contact(&mut draft);
    draft.fields.phone = String::new();
    draft.advance().expect("contact ok, phone optional here");
    draft.fields.document_type = Some(DocumentType::Lease);
    draft.advance().expect("document details ok");

    assert!(draft.advance().is_err(), "no document uploaded yet");
    draft.fields.document = Some(pdf());
    draft.advance().expect("upload step ok");
    assert_eq!(4, draft.current_step());
  }

  #[test]
  fn test_cannot_advance_past_final_step() {
    let mut draft = SubmissionDraft::new(LocalUserId(1), WorkflowKind::Consultation);
    filled_contact(&mut draft);
    draft.fields.inquiry = "Please advise on an early termination clause in our office lease."
      .to_string();
    for _ in 0..3 {
      draft.advance().expect("walk to the final step");
    }
    assert_eq!(4, draft.current_step());
    assert!(draft.advance().is_err());
  }

  #[test]
  fn test_snapshot_roundtrip_through_json() {
    let mut draft = SubmissionDraft::new(LocalUserId(3), WorkflowKind::DocumentReview);
    filled_contact(&mut draft);
    draft.fields.document_type = Some(DocumentType::EmploymentContract);
    draft.fields.document = Some(pdf());

    let snapshot = draft.snapshot();
    let json = snapshot.to_json().expect("serialize snapshot");
    let restored = DraftSnapshot::from_json(json).expect("parse snapshot");
    assert_eq!(snapshot, restored);

    let resumed = SubmissionDraft::resume(LocalUserId(3), restored);
    assert_eq!(5, resumed.current_step());
    assert_eq!("Maria Santos", resumed.fields.name);
  }

  #[test]
  fn test_incomplete_snapshot_rejected() {
    let draft = SubmissionDraft::new(LocalUserId(1), WorkflowKind::DocumentReview);
    assert!(draft.snapshot().ensure_complete().is_err());
  }
}
