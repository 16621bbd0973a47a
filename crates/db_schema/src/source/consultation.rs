use crate::newtypes::{ConsultationDocumentId, ConsultationId, LocalUserId};
use chrono::{DateTime, Utc};
use lexportal_db_schema_file::{
  enums::SubmissionStatus,
  schema::{consultation, consultation_document},
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

#[skip_serializing_none]
#[derive(
  Clone, PartialEq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable,
)]
#[diesel(table_name = consultation)]
#[diesel(primary_key(id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
/// A free legal-consultation request. Created directly on submission,
/// without any payment gate.
pub struct Consultation {
  pub id: ConsultationId,
  pub owner_id: LocalUserId,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub company_name: Option<String>,
  pub inquiry: String,
  pub status: SubmissionStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, derive_new::new, Insertable, AsChangeset)]
#[diesel(table_name = consultation)]
pub struct ConsultationInsertForm {
  pub owner_id: LocalUserId,
  pub name: String,
  pub email: String,
  pub phone: String,
  #[new(default)]
  pub company_name: Option<String>,
  pub inquiry: String,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = consultation)]
pub struct ConsultationUpdateForm {
  pub status: Option<SubmissionStatus>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(
  Clone, PartialEq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable, Associations,
)]
#[diesel(table_name = consultation_document)]
#[diesel(primary_key(id))]
#[diesel(belongs_to(Consultation))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
/// A stored attachment belonging to a consultation. Validated before it
/// ever reaches blob storage, so rows here always describe real objects.
pub struct ConsultationDocument {
  pub id: ConsultationDocumentId,
  pub consultation_id: ConsultationId,
  pub name: String,
  pub url: String,
  pub content_type: String,
  pub size: i64,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, derive_new::new, Insertable)]
#[diesel(table_name = consultation_document)]
pub struct ConsultationDocumentInsertForm {
  pub consultation_id: ConsultationId,
  pub name: String,
  pub url: String,
  pub content_type: String,
  pub size: i64,
}
