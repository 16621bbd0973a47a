use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lexportal_db_schema::newtypes::LocalUserId;
use lexportal_utils::error::{PortalErrorExt, PortalErrorType, PortalResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Claims {
  /// local_user_id, standard claim by RFC 7519.
  pub sub: String,
  pub iss: String,
  /// Time when this token was issued as UNIX-timestamp in seconds
  pub iat: i64,
  pub exp: i64,
}

impl Claims {
  /// Tokens are minted by the auth service; here we only check the
  /// signature and expiry, then pull the owner id out of `sub`.
  pub fn validate(jwt: &str, jwt_secret: &str) -> PortalResult<LocalUserId> {
    let validation = Validation::default();
    let key = DecodingKey::from_secret(jwt_secret.as_ref());
    let claims =
      decode::<Claims>(jwt, &key, &validation).with_portal_type(PortalErrorType::NotLoggedIn)?;
    let user_id = LocalUserId(
      claims
        .claims
        .sub
        .parse()
        .with_portal_type(PortalErrorType::NotLoggedIn)?,
    );
    Ok(user_id)
  }

  pub fn generate(user_id: LocalUserId, hostname: &str, jwt_secret: &str) -> PortalResult<String> {
    let my_claims = Claims {
      sub: user_id.0.to_string(),
      iss: hostname.to_string(),
      iat: Utc::now().timestamp(),
      exp: (Utc::now() + Duration::hours(12)).timestamp(),
    };
    let key = EncodingKey::from_secret(jwt_secret.as_ref());
    encode(&Header::default(), &my_claims, &key)
      .with_portal_type(PortalErrorType::SerializationFailed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_roundtrip() {
    let jwt = Claims::generate(LocalUserId(42), "portal.example.com", "s3cret")
      .expect("generate token");
    let user_id = Claims::validate(&jwt, "s3cret").expect("validate token");
    assert_eq!(LocalUserId(42), user_id);
  }

  #[test]
  fn test_wrong_secret_rejected() {
    let jwt =
      Claims::generate(LocalUserId(42), "portal.example.com", "s3cret").expect("generate token");
    assert!(Claims::validate(&jwt, "other").is_err());
  }
}
