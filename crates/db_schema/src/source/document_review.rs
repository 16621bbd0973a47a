use crate::newtypes::{DocumentReviewId, LocalUserId};
use chrono::{DateTime, Utc};
use lexportal_db_schema_file::{
  enums::{DocumentType, PaymentMethod, SubmissionStatus},
  schema::document_review,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(
  Clone, PartialEq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable,
)]
#[diesel(table_name = document_review)]
#[diesel(primary_key(id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
/// A paid document-review request. Only the submission finalizer creates
/// rows here, and only after the referenced payment was confirmed
/// succeeded against the gateway. `payment_id` carries a unique index,
/// which is what makes concurrent finalization attempts collapse into a
/// single row.
pub struct DocumentReview {
  pub id: DocumentReviewId,
  pub owner_id: LocalUserId,
  pub name: String,
  pub email: String,
  pub phone: Option<String>,
  pub document_type: DocumentType,
  pub additional_details: Option<String>,
  pub document_name: String,
  pub document_url: String,
  pub document_content_type: String,
  pub document_size: i64,
  pub status: SubmissionStatus,
  pub paid: bool,
  pub payment_id: String,
  /// Decimal major-currency amount (pesos). Centavos only exist at the
  /// gateway boundary.
  pub payment_amount: f64,
  pub payment_method: PaymentMethod,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, derive_new::new, Insertable, AsChangeset)]
#[diesel(table_name = document_review)]
pub struct DocumentReviewInsertForm {
  pub owner_id: LocalUserId,
  pub name: String,
  pub email: String,
  #[new(default)]
  pub phone: Option<String>,
  pub document_type: DocumentType,
  #[new(default)]
  pub additional_details: Option<String>,
  pub document_name: String,
  pub document_url: String,
  pub document_content_type: String,
  pub document_size: i64,
  pub paid: bool,
  pub payment_id: String,
  pub payment_amount: f64,
  pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = document_review)]
pub struct DocumentReviewUpdateForm {
  pub status: Option<SubmissionStatus>,
  pub updated_at: Option<DateTime<Utc>>,
}
