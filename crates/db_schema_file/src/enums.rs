use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash, DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::SubmissionStatusEnum"]
#[DbValueStyle = "verbatim"]
/// Lifecycle of a persisted submission. Created as `Pending`; every later
/// transition is a staff-side status update.
pub enum SubmissionStatus {
  #[default]
  Pending,
  InProgress,
  Completed,
  Closed,
  Rejected,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::PaymentMethodEnum"]
#[DbValueStyle = "snake_case"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
/// How a document review was paid for. `Card` confirms synchronously via
/// a payment intent; the e-wallets confirm asynchronously via a redirect
/// source and a webhook.
pub enum PaymentMethod {
  Card,
  Gcash,
  GrabPay,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::DocumentTypeEnum"]
#[DbValueStyle = "verbatim"]
pub enum DocumentType {
  BusinessAgreement,
  Lease,
  EmploymentContract,
  Other,
}

#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash, DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::SourceStatusEnum"]
#[DbValueStyle = "verbatim"]
/// Bookkeeping state of a redirect payment source. Purely internal; the
/// user-visible signal for a failed source is the failure redirect URL.
pub enum SourceStatus {
  /// Created pre-redirect, nothing heard from the processor yet.
  #[default]
  Pending,
  /// `source.chargeable` received, a payment has been created against it.
  Chargeable,
  /// `payment.paid` received and the submission was finalized.
  Consumed,
  /// `payment.failed` received.
  Failed,
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn payment_method_wire_names() {
    assert_eq!("grab_pay", PaymentMethod::GrabPay.to_string());
    assert_eq!("gcash", PaymentMethod::Gcash.to_string());
    assert_eq!(
      PaymentMethod::Card,
      PaymentMethod::from_str("card").expect("parse payment method")
    );
  }
}
