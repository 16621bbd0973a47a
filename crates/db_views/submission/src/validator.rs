//! Request validation for submission endpoints. Handlers accept only the
//! `Valid*` wrappers, so an unvalidated form cannot reach the database.
use crate::api::{CreateConsultation, CreateDocumentReview, UploadedDocument};
use lexportal_utils::{
  error::{PortalError, PortalErrorType, PortalResult},
  utils::validation::{
    additional_details_length_check,
    check_upload_content_type,
    check_upload_size,
    inquiry_length_check,
    is_valid_client_name,
    is_valid_email_address,
    is_valid_phone_number,
  },
};

/// Consent must be the literal true. Defaults never opt a client in.
pub fn check_privacy_consent(privacy_consent: bool) -> PortalResult<()> {
  if privacy_consent {
    Ok(())
  } else {
    Err(PortalErrorType::PrivacyConsentRequired.into())
  }
}

pub fn check_uploaded_document(document: &UploadedDocument) -> PortalResult<()> {
  if document.name.trim().is_empty() || document.url.trim().is_empty() {
    return Err(PortalErrorType::DocumentRequired.into());
  }
  check_upload_content_type(&document.content_type)?;
  check_upload_size(u64::try_from(document.size).unwrap_or(u64::MAX))
}

fn check_payment_id(payment_id: &str) -> PortalResult<()> {
  if payment_id.trim().is_empty() {
    return Err(PortalErrorType::InvalidField("payment id is required".to_string()).into());
  }
  Ok(())
}

#[derive(Debug, Clone)]
pub struct ValidCreateConsultation(pub CreateConsultation);

impl TryFrom<CreateConsultation> for ValidCreateConsultation {
  type Error = PortalError;

  fn try_from(value: CreateConsultation) -> Result<Self, Self::Error> {
    check_privacy_consent(value.privacy_consent)?;
    is_valid_client_name(&value.name)?;
    is_valid_email_address(&value.email)?;
    is_valid_phone_number(&value.phone)?;
    inquiry_length_check(&value.inquiry)?;
    for document in &value.documents {
      check_uploaded_document(document)?;
    }
    Ok(ValidCreateConsultation(value))
  }
}

#[derive(Debug, Clone)]
pub struct ValidCreateDocumentReview(pub CreateDocumentReview);

impl TryFrom<CreateDocumentReview> for ValidCreateDocumentReview {
  type Error = PortalError;

  fn try_from(value: CreateDocumentReview) -> Result<Self, Self::Error> {
    check_privacy_consent(value.privacy_consent)?;
    is_valid_client_name(&value.name)?;
    is_valid_email_address(&value.email)?;
    if let Some(phone) = &value.phone {
      is_valid_phone_number(phone)?;
    }
    if let Some(details) = &value.additional_details {
      additional_details_length_check(details)?;
    }
    check_uploaded_document(&value.document)?;
    check_payment_id(&value.payment_id)?;
    Ok(ValidCreateDocumentReview(value))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use lexportal_db_schema_file::enums::{DocumentType, PaymentMethod};

  fn consultation_form() -> CreateConsultation {
    CreateConsultation {
      name: "Maria Santos".to_string(),
      email: "maria@example.com".to_string(),
      phone: "+63 917 123 4567".to_string(),
      company_name: None,
      inquiry: "I need advice on terminating a commercial lease early without penalties."
        .to_string(),
      privacy_consent: true,
      documents: vec![],
    }
  }

  fn review_form() -> CreateDocumentReview {
    CreateDocumentReview {
      name: "Maria Santos".to_string(),
      email: "maria@example.com".to_string(),
      phone: None,
      document_type: DocumentType::Lease,
      additional_details: None,
      document: UploadedDocument {
        name: "lease.pdf".to_string(),
        url: "/files/document-review/7/abc-lease.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        size: 120_000,
      },
      privacy_consent: true,
      payment_id: "pi_abc123".to_string(),
      payment_method: PaymentMethod::Card,
    }
  }

  #[test]
  fn test_consent_must_be_explicit() {
    let mut form = consultation_form();
    form.privacy_consent = false;
    assert!(ValidCreateConsultation::try_from(form).is_err());
    assert!(ValidCreateConsultation::try_from(consultation_form()).is_ok());
  }

  #[test]
  fn test_rejects_bad_attachment() {
    let mut form = review_form();
    form.document.content_type = "application/zip".to_string();
    assert!(ValidCreateDocumentReview::try_from(form).is_err());

    let mut form = review_form();
    form.document.size = 11 * 1024 * 1024;
    assert!(ValidCreateDocumentReview::try_from(form).is_err());
  }

  #[test]
  fn test_rejects_blank_payment_id() {
    let mut form = review_form();
    form.payment_id = "  ".to_string();
    assert!(ValidCreateDocumentReview::try_from(form).is_err());
  }

  #[test]
  fn test_optional_phone_still_validated() {
    let mut form = review_form();
    form.phone = Some("123".to_string());
    assert!(ValidCreateDocumentReview::try_from(form).is_err());
  }
}
