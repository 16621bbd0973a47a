use crate::{claims::Claims, context::PortalContext, AUTH_COOKIE_NAME};
use actix_web::{
  dev::Payload,
  http::header::Header,
  web::Data,
  FromRequest,
  HttpRequest,
};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use lexportal_db_schema::newtypes::LocalUserId;
use lexportal_utils::error::{PortalError, PortalErrorType, PortalResult};
use std::future::{ready, Ready};

pub fn read_auth_token(req: &HttpRequest) -> PortalResult<Option<String>> {
  // Try reading jwt from auth header
  if let Ok(header) = Authorization::<Bearer>::parse(req) {
    Ok(Some(header.as_ref().token().to_string()))
  }
  // If that fails, try to read from cookie
  else if let Some(cookie) = &req.cookie(AUTH_COOKIE_NAME) {
    Ok(Some(cookie.value().to_string()))
  }
  // Otherwise, there's no auth
  else {
    Ok(None)
  }
}

/// The authenticated owner behind a request. Every handler that touches
/// client data goes through this and passes the id onward explicitly.
pub fn require_owner(req: &HttpRequest, context: &PortalContext) -> PortalResult<LocalUserId> {
  let jwt = read_auth_token(req)?.ok_or(PortalErrorType::NotLoggedIn)?;
  Claims::validate(&jwt, &context.secret().jwt_secret)
}

/// Extractor form of [`require_owner`] for handler signatures.
#[derive(Debug, Clone, Copy)]
pub struct AuthedOwner(pub LocalUserId);

impl FromRequest for AuthedOwner {
  type Error = PortalError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let result = req
      .app_data::<Data<PortalContext>>()
      .ok_or_else(|| PortalError::from(PortalErrorType::NotLoggedIn))
      .and_then(|context| require_owner(req, context))
      .map(AuthedOwner);
    ready(result)
  }
}
