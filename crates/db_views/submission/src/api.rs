use crate::{ConsultationView, SubmissionRecord};
use lexportal_db_schema::source::document_review::DocumentReview;
use lexportal_db_schema_file::enums::{DocumentType, PaymentMethod};
use serde::{Deserialize, Serialize};

/// A file already uploaded through the file routes, referenced by the
/// URL those routes returned.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedDocument {
  pub name: String,
  pub url: String,
  pub content_type: String,
  pub size: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Submit a free consultation request.
pub struct CreateConsultation {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub company_name: Option<String>,
  pub inquiry: String,
  /// Must be literally true. Absent or false is rejected, there is no
  /// implied consent.
  #[serde(default)]
  pub privacy_consent: bool,
  #[serde(default)]
  pub documents: Vec<UploadedDocument>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
  pub consultation_view: ConsultationView,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListConsultationsResponse {
  pub consultations: Vec<ConsultationView>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Finalize a paid document review. The payment must already have been
/// confirmed by the gateway; the server re-checks, the client's word is
/// not enough.
pub struct CreateDocumentReview {
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub document_type: DocumentType,
  pub additional_details: Option<String>,
  pub document: UploadedDocument,
  #[serde(default)]
  pub privacy_consent: bool,
  pub payment_id: String,
  pub payment_method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReviewResponse {
  pub document_review: DocumentReview,
  /// False when this request replayed an already-finalized payment and
  /// the existing record was returned instead.
  pub created: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentReviewsResponse {
  pub document_reviews: Vec<DocumentReview>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecordResponse {
  pub submission: SubmissionRecord,
}
