use crate::newtypes::{LocalUserId, PaymentSourceReferenceId};
use chrono::{DateTime, Utc};
use lexportal_db_schema_file::{
  enums::{PaymentMethod, SourceStatus},
  schema::payment_source_reference,
};
use serde::{Deserialize, Serialize};

#[derive(
  Clone, PartialEq, Debug, Serialize, Deserialize, Queryable, Selectable, Identifiable,
)]
#[diesel(table_name = payment_source_reference)]
#[diesel(primary_key(id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[serde(rename_all = "camelCase")]
/// Bookkeeping row for a redirect (e-wallet) payment. Written before the
/// browser leaves for the processor's checkout page; the webhook receiver
/// later recovers the owner and the staged draft from it, since control
/// never returns to the in-memory draft that initiated the payment.
pub struct PaymentSourceReference {
  pub id: PaymentSourceReferenceId,
  pub source_id: String,
  pub owner_id: LocalUserId,
  pub method: PaymentMethod,
  /// Decimal major-currency amount (pesos).
  pub amount: f64,
  /// Full draft snapshot staged pre-redirect, serialized as JSON.
  pub draft: serde_json::Value,
  pub status: SourceStatus,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, derive_new::new, Insertable)]
#[diesel(table_name = payment_source_reference)]
pub struct PaymentSourceReferenceInsertForm {
  pub source_id: String,
  pub owner_id: LocalUserId,
  pub method: PaymentMethod,
  pub amount: f64,
  pub draft: serde_json::Value,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = payment_source_reference)]
pub struct PaymentSourceReferenceUpdateForm {
  pub status: Option<SourceStatus>,
  pub updated_at: Option<DateTime<Utc>>,
}
