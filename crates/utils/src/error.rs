use serde::{Deserialize, Serialize};
use std::{backtrace::Backtrace, fmt, fmt::Debug};
use strum::{Display, EnumIter};

#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, EnumIter, Hash)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
#[non_exhaustive]
pub enum PortalErrorType {
  // Draft / form validation. These stay local to the owning step and
  // never abort a whole submission flow.
  NameTooShort,
  InvalidEmailAddress(String),
  InvalidPhoneNumber,
  /// Legal inquiries must carry at least 50 characters of detail.
  InquiryTooShort,
  PrivacyConsentRequired,
  InvalidDocumentType,
  DocumentRequired,
  FileTooLarge,
  InvalidFileType(String),
  InvalidStep,
  InvalidField(String),
  // Payment gateway
  PaymentRejected(String),
  PaymentGatewayUnreachable,
  InvalidPaymentRequest,
  PaymentNotConfirmed,
  MissingCheckoutUrl,
  UnknownPaymentMethod,
  ReturnedNonJsonResponse,
  // Record store
  CouldntCreateConsultation,
  CouldntCreateDocumentReview,
  CouldntCreatePaymentSourceReference,
  CouldntUpdatePaymentSourceReference,
  PaymentSourceNotFound,
  DatabaseError,
  CouldntConnectDatabase,
  NotFound,
  // Auth boundary
  NotLoggedIn,
  UnauthorizedAccess,
  // Webhook
  InvalidWebhookPayload,
  // Email
  EmailSendFailed,
  NoEmailSetup,
  // Files
  InvalidBodyField,
  NoContentTypeHeader,
  FileNotFound,
  CouldntDeleteFile,
  // Catch-all
  SerializationFailed,
  Unknown(String),
}

pub type PortalResult<T> = Result<T, PortalError>;

pub struct PortalError {
  pub error_type: PortalErrorType,
  pub inner: anyhow::Error,
  pub context: Backtrace,
}

impl<T> From<T> for PortalError
where
  T: Into<anyhow::Error>,
{
  fn from(t: T) -> Self {
    let cause = t.into();
    let error_type = match cause.downcast_ref::<diesel::result::Error>() {
      Some(&diesel::NotFound) => PortalErrorType::NotFound,
      _ => PortalErrorType::Unknown(format!("{}", &cause)),
    };
    PortalError {
      error_type,
      inner: cause,
      context: Backtrace::capture(),
    }
  }
}

impl Debug for PortalError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PortalError")
      .field("message", &self.error_type)
      .field("inner", &self.inner)
      .field("context", &self.context)
      .finish()
  }
}

impl fmt::Display for PortalError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{}", self.inner)?;
    fmt::Display::fmt(&self.context, f)
  }
}

impl actix_web::error::ResponseError for PortalError {
  fn status_code(&self) -> actix_web::http::StatusCode {
    match self.error_type {
      PortalErrorType::NotLoggedIn | PortalErrorType::UnauthorizedAccess => {
        actix_web::http::StatusCode::UNAUTHORIZED
      }
      PortalErrorType::NotFound => actix_web::http::StatusCode::NOT_FOUND,
      PortalErrorType::DatabaseError
      | PortalErrorType::CouldntConnectDatabase
      | PortalErrorType::EmailSendFailed => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
      _ => actix_web::http::StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> actix_web::HttpResponse {
    actix_web::HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<PortalErrorType> for PortalError {
  fn from(error_type: PortalErrorType) -> Self {
    let inner = anyhow::anyhow!("{}", error_type);
    PortalError {
      error_type,
      inner,
      context: Backtrace::capture(),
    }
  }
}

pub trait PortalErrorExt<T, E: Into<anyhow::Error>> {
  fn with_portal_type(self, error_type: PortalErrorType) -> PortalResult<T>;
}

impl<T, E: Into<anyhow::Error>> PortalErrorExt<T, E> for Result<T, E> {
  fn with_portal_type(self, error_type: PortalErrorType) -> PortalResult<T> {
    self.map_err(|error| PortalError {
      error_type,
      inner: error.into(),
      context: Backtrace::capture(),
    })
  }
}

pub trait PortalErrorExt2<T> {
  fn with_portal_type(self, error_type: PortalErrorType) -> PortalResult<T>;
  fn into_anyhow(self) -> Result<T, anyhow::Error>;
}

impl<T> PortalErrorExt2<T> for PortalResult<T> {
  fn with_portal_type(self, error_type: PortalErrorType) -> PortalResult<T> {
    self.map_err(|mut e| {
      e.error_type = error_type;
      e
    })
  }

  // this function can't be an impl From or similar because it would conflict
  // with one of the other broad Into<> implementations
  fn into_anyhow(self) -> Result<T, anyhow::Error> {
    self.map_err(|e| e.inner)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::indexing_slicing)]
  use super::*;
  use actix_web::{body::MessageBody, ResponseError};
  use pretty_assertions::assert_eq;

  #[test]
  fn deserializes_no_message() -> PortalResult<()> {
    let err = PortalError::from(PortalErrorType::PaymentNotConfirmed).error_response();
    let json = String::from_utf8(err.into_body().try_into_bytes().unwrap_or_default().to_vec())?;
    assert_eq!(&json, "{\"error\":\"payment_not_confirmed\"}");

    Ok(())
  }

  #[test]
  fn deserializes_with_message() -> PortalResult<()> {
    let rejected = PortalErrorType::PaymentRejected(String::from("card declined"));
    let err = PortalError::from(rejected).error_response();
    let json = String::from_utf8(err.into_body().try_into_bytes().unwrap_or_default().to_vec())?;
    assert_eq!(
      &json,
      "{\"error\":\"payment_rejected\",\"message\":\"card declined\"}"
    );

    Ok(())
  }

  #[test]
  fn test_convert_diesel_errors() {
    let not_found_error = PortalError::from(diesel::NotFound);
    assert_eq!(PortalErrorType::NotFound, not_found_error.error_type);
    assert_eq!(404, not_found_error.status_code());

    let other_error = PortalError::from(diesel::result::Error::NotInTransaction);
    assert!(matches!(
      other_error.error_type,
      PortalErrorType::Unknown { .. }
    ));
    assert_eq!(400, other_error.status_code());
  }
}
