use crate::amount::pesos_to_centavos;
use lexportal_db_schema_file::enums::PaymentMethod;
use lexportal_utils::{
  error::{PortalErrorExt, PortalErrorType, PortalResult},
  settings::structs::PaymongoConfig,
};
use reqwest_middleware::ClientWithMiddleware;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Gateway-side lifecycle of a payment attempt, collapsed from the
/// processor's per-resource status strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
  Created,
  AwaitingConfirmation,
  Succeeded,
  Failed,
}

impl PaymentStatus {
  pub fn from_wire(status: &str) -> Self {
    match status {
      // "paid" is the payments resource, "succeeded" the intents resource
      "paid" | "succeeded" => PaymentStatus::Succeeded,
      "failed" | "cancelled" | "expired" => PaymentStatus::Failed,
      "awaiting_next_action" | "processing" | "pending" | "chargeable" => {
        PaymentStatus::AwaitingConfirmation
      }
      _ => PaymentStatus::Created,
    }
  }
}

/// PayMongo wraps every request and response in `{data: ...}`, and every
/// resource carries its payload under `attributes`.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
  data: T,
}

#[derive(Debug, Serialize)]
struct AttributesBody<T> {
  attributes: T,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Resource<A> {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub attributes: A,
}

#[derive(Debug, Serialize)]
struct CreateIntentAttributes {
  /// Integral centavos.
  amount: i64,
  currency: String,
  description: String,
  payment_method_allowed: Vec<String>,
  payment_method_options: PaymentMethodOptions,
  metadata: HashMap<String, String>,
  capture_type: String,
}

#[derive(Debug, Serialize)]
struct PaymentMethodOptions {
  card: CardOptions,
}

#[derive(Debug, Serialize)]
struct CardOptions {
  request_three_d_secure: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntentAttributes {
  pub amount: i64,
  pub currency: String,
  pub status: String,
  pub client_key: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateSourceAttributes {
  amount: i64,
  currency: String,
  #[serde(rename = "type")]
  kind: String,
  redirect: RedirectRequest,
}

#[derive(Debug, Serialize)]
struct RedirectRequest {
  success: String,
  failed: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceAttributes {
  pub amount: i64,
  pub currency: String,
  pub status: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub redirect: RedirectResponse,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedirectResponse {
  pub success: String,
  pub failed: String,
  #[serde(default)]
  pub checkout_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreatePaymentAttributes {
  amount: i64,
  currency: String,
  description: String,
  source: SourcePointer,
}

#[derive(Debug, Serialize)]
struct SourcePointer {
  id: String,
  #[serde(rename = "type")]
  kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentAttributes {
  pub amount: i64,
  pub currency: String,
  pub status: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
  errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
  code: String,
  detail: String,
}

pub type PaymentIntent = Resource<IntentAttributes>;
pub type PaymentSource = Resource<SourceAttributes>;
pub type Payment = Resource<PaymentAttributes>;

/// Thin client over the PayMongo REST API, authenticated with the
/// server-side secret key as the basic-auth username and an empty
/// password. A payment attempt only exists once a 2xx response carried
/// an id back; anything else maps to a gateway error and callers must
/// not assume the processor recorded anything.
pub struct PaymongoClient {
  client: ClientWithMiddleware,
  api_url: Url,
  secret_key: String,
}

impl PaymongoClient {
  pub fn new(client: ClientWithMiddleware, config: &PaymongoConfig) -> Self {
    Self {
      client,
      api_url: config.api_url.clone(),
      secret_key: config.secret_key.clone(),
    }
  }

  /// Create a payment intent for the synchronous card flow. The caller
  /// owns the 3-D-Secure challenge using the returned client key; the
  /// adapter never sees card data.
  #[tracing::instrument(skip(self, metadata))]
  pub async fn create_intent(
    &self,
    amount_pesos: f64,
    description: &str,
    metadata: HashMap<String, String>,
  ) -> PortalResult<PaymentIntent> {
    let attributes = CreateIntentAttributes {
      amount: pesos_to_centavos(amount_pesos),
      currency: "PHP".to_string(),
      description: description.to_string(),
      payment_method_allowed: vec!["card".to_string()],
      payment_method_options: PaymentMethodOptions {
        card: CardOptions {
          request_three_d_secure: "any".to_string(),
        },
      },
      metadata,
      capture_type: "automatic".to_string(),
    };
    self.post("payment_intents", attributes).await
  }

  /// Create a redirect source for an e-wallet payment. The caller must
  /// persist a payment source reference before sending the browser to
  /// the returned checkout URL.
  #[tracing::instrument(skip(self))]
  pub async fn create_source(
    &self,
    amount_pesos: f64,
    method: PaymentMethod,
    success_url: &str,
    failure_url: &str,
  ) -> PortalResult<PaymentSource> {
    if method == PaymentMethod::Card {
      return Err(PortalErrorType::UnknownPaymentMethod.into());
    }
    let attributes = CreateSourceAttributes {
      amount: pesos_to_centavos(amount_pesos),
      currency: "PHP".to_string(),
      kind: method.to_string(),
      redirect: RedirectRequest {
        success: success_url.to_string(),
        failed: failure_url.to_string(),
      },
    };
    self.post("sources", attributes).await
  }

  /// Charge a chargeable source. Two-step source model: this runs on
  /// `source.chargeable` and must happen before `payment.paid` can.
  #[tracing::instrument(skip(self))]
  pub async fn create_payment(
    &self,
    source_id: &str,
    amount_pesos: f64,
    description: &str,
  ) -> PortalResult<Payment> {
    let attributes = CreatePaymentAttributes {
      amount: pesos_to_centavos(amount_pesos),
      currency: "PHP".to_string(),
      description: description.to_string(),
      source: SourcePointer {
        id: source_id.to_string(),
        kind: "source".to_string(),
      },
    };
    self.post("payments", attributes).await
  }

  pub async fn retrieve_payment(&self, payment_id: &str) -> PortalResult<Payment> {
    self.get(&format!("payments/{payment_id}")).await
  }

  pub async fn retrieve_intent(&self, intent_id: &str) -> PortalResult<PaymentIntent> {
    self.get(&format!("payment_intents/{intent_id}")).await
  }

  /// Idempotent status read, safe to call repeatedly. This is the only
  /// payment-confirmation input the finalizer trusts; id prefixes follow
  /// the processor's resource naming (`pi_` intents, everything else
  /// payments).
  pub async fn retrieve_status(&self, payment_id: &str) -> PortalResult<PaymentStatus> {
    if payment_id.starts_with("pi_") {
      let intent = self.retrieve_intent(payment_id).await?;
      Ok(PaymentStatus::from_wire(&intent.attributes.status))
    } else {
      let payment = self.retrieve_payment(payment_id).await?;
      Ok(PaymentStatus::from_wire(&payment.attributes.status))
    }
  }

  async fn post<Req: Serialize, Res: DeserializeOwned>(
    &self,
    path: &str,
    attributes: Req,
  ) -> PortalResult<Res> {
    let url = self.endpoint(path)?;
    let body = Envelope {
      data: AttributesBody { attributes },
    };
    let res = self
      .client
      .post(url)
      .basic_auth(&self.secret_key, Some(""))
      .json(&body)
      .send()
      .await
      .with_portal_type(PortalErrorType::PaymentGatewayUnreachable)?;
    Self::read_response(res).await
  }

  async fn get<Res: DeserializeOwned>(&self, path: &str) -> PortalResult<Res> {
    let url = self.endpoint(path)?;
    let res = self
      .client
      .get(url)
      .basic_auth(&self.secret_key, Some(""))
      .send()
      .await
      .with_portal_type(PortalErrorType::PaymentGatewayUnreachable)?;
    Self::read_response(res).await
  }

  fn endpoint(&self, path: &str) -> PortalResult<Url> {
    self
      .api_url
      .join(path)
      .with_portal_type(PortalErrorType::InvalidPaymentRequest)
  }

  async fn read_response<Res: DeserializeOwned>(res: reqwest::Response) -> PortalResult<Res> {
    let status = res.status();
    let text = res
      .text()
      .await
      .with_portal_type(PortalErrorType::PaymentGatewayUnreachable)?;

    if status.is_success() {
      let envelope: Envelope<Res> = serde_json::from_str(&text)
        .with_portal_type(PortalErrorType::ReturnedNonJsonResponse)?;
      return Ok(envelope.data);
    }

    let detail = serde_json::from_str::<ApiErrorBody>(&text)
      .ok()
      .and_then(|b| b.errors.into_iter().next())
      .map(|e| format!("{}: {}", e.code, e.detail))
      .unwrap_or_else(|| format!("http status {status}"));

    if status.is_server_error() {
      tracing::warn!("paymongo unavailable: {detail}");
      Err(PortalErrorType::PaymentGatewayUnreachable.into())
    } else if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
      Err(PortalErrorType::InvalidPaymentRequest.into())
    } else {
      Err(PortalErrorType::PaymentRejected(detail).into())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_status_from_wire() {
    assert_eq!(PaymentStatus::Succeeded, PaymentStatus::from_wire("paid"));
    assert_eq!(
      PaymentStatus::Succeeded,
      PaymentStatus::from_wire("succeeded")
    );
    assert_eq!(PaymentStatus::Failed, PaymentStatus::from_wire("failed"));
    assert_eq!(
      PaymentStatus::AwaitingConfirmation,
      PaymentStatus::from_wire("chargeable")
    );
    assert_eq!(
      PaymentStatus::Created,
      PaymentStatus::from_wire("awaiting_payment_method")
    );
  }

  #[test]
  fn test_intent_request_body_shape() {
    let body = Envelope {
      data: AttributesBody {
        attributes: CreateIntentAttributes {
          amount: pesos_to_centavos(500.0),
          currency: "PHP".to_string(),
          description: "Document Review Service".to_string(),
          payment_method_allowed: vec!["card".to_string()],
          payment_method_options: PaymentMethodOptions {
            card: CardOptions {
              request_three_d_secure: "any".to_string(),
            },
          },
          metadata: HashMap::new(),
          capture_type: "automatic".to_string(),
        },
      },
    };
    let json = serde_json::to_value(&body).expect("serialize intent body");
    assert_eq!(50000, json["data"]["attributes"]["amount"]);
    assert_eq!("PHP", json["data"]["attributes"]["currency"]);
    assert_eq!(
      "any",
      json["data"]["attributes"]["payment_method_options"]["card"]["request_three_d_secure"]
    );
  }

  #[test]
  fn test_parse_intent_response() {
    let raw = r#"{
      "data": {
        "id": "pi_abc123",
        "type": "payment_intent",
        "attributes": {
          "amount": 50000,
          "currency": "PHP",
          "status": "awaiting_payment_method",
          "client_key": "pi_abc123_client_xyz",
          "description": "Document Review Service"
        }
      }
    }"#;
    let envelope: Envelope<PaymentIntent> = serde_json::from_str(raw).expect("parse intent");
    assert_eq!("pi_abc123", envelope.data.id);
    assert_eq!(50000, envelope.data.attributes.amount);
    assert_eq!(
      PaymentStatus::Created,
      PaymentStatus::from_wire(&envelope.data.attributes.status)
    );
  }

  #[test]
  fn test_parse_source_response() {
    let raw = r#"{
      "data": {
        "id": "src_xyz789",
        "type": "source",
        "attributes": {
          "amount": 50000,
          "currency": "PHP",
          "status": "pending",
          "type": "gcash",
          "redirect": {
            "success": "https://portal.example.com/payment-success",
            "failed": "https://portal.example.com/payment-failure",
            "checkout_url": "https://checkout.paymongo.com/src_xyz789"
          }
        }
      }
    }"#;
    let envelope: Envelope<PaymentSource> = serde_json::from_str(raw).expect("parse source");
    assert_eq!("src_xyz789", envelope.data.id);
    assert_eq!("gcash", envelope.data.attributes.kind);
    assert_eq!(
      Some("https://checkout.paymongo.com/src_xyz789".to_string()),
      envelope.data.attributes.redirect.checkout_url
    );
  }

  #[test]
  fn test_parse_error_body() {
    let raw = r#"{"errors": [{"code": "parameter_invalid", "detail": "amount must be at least 2000"}]}"#;
    let body: ApiErrorBody = serde_json::from_str(raw).expect("parse errors");
    assert_eq!("parameter_invalid", body.errors[0].code);
  }
}
