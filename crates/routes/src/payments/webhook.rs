use actix_web::web::{Data, Json};
use lexportal_api_utils::context::PortalContext;
use lexportal_db_schema::source::payment_source_reference::PaymentSourceReference;
use lexportal_db_schema_file::enums::SourceStatus;
use lexportal_utils::error::{PortalError, PortalErrorType, PortalResult};
use lexportal_workflow::{
  api::payment_description,
  finalize::finalize_document_review,
  DraftSnapshot,
  PaidWith,
};
use serde::{Deserialize, Serialize};

/// PayMongo event envelope: the event's own attributes carry a `type`
/// string and the affected resource under `data`.
#[derive(Debug, Deserialize)]
pub struct WebhookEnvelope {
  pub data: WebhookEvent,
}

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
  pub attributes: WebhookAttributes,
}

#[derive(Debug, Deserialize)]
pub struct WebhookAttributes {
  #[serde(rename = "type")]
  pub kind: String,
  pub data: EventResource,
}

#[derive(Debug, Deserialize)]
pub struct EventResource {
  pub id: String,
  #[serde(default)]
  pub attributes: EventResourceAttributes,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EventResourceAttributes {
  pub status: Option<String>,
  pub amount: Option<i64>,
  pub source: Option<SourceRef>,
}

#[derive(Debug, Deserialize)]
pub struct SourceRef {
  pub id: String,
}

#[derive(Debug, Serialize)]
pub struct WebhookReceived {
  pub received: bool,
}

/// Entry point for PayMongo events. Unknown event types and references
/// we have no row for are acknowledged with 200 so the processor stops
/// retrying them; real processing failures bubble up as errors and get
/// retried.
#[tracing::instrument(skip(context, data))]
pub async fn paymongo_webhook(
  data: Json<WebhookEnvelope>,
  context: Data<PortalContext>,
) -> PortalResult<Json<WebhookReceived>> {
  let attributes = data.into_inner().data.attributes;
  match attributes.kind.as_str() {
    "source.chargeable" => handle_source_chargeable(&context, &attributes.data).await?,
    "payment.paid" => handle_payment_paid(&context, &attributes.data).await?,
    "payment.failed" => handle_payment_failed(&context, &attributes.data).await?,
    other => {
      tracing::info!("Unhandled webhook event: {other}");
    }
  }
  Ok(Json(WebhookReceived { received: true }))
}

/// The client authorized the source at the processor's checkout page; we
/// now have to actually charge it. `payment.paid` follows once the
/// charge settles.
async fn handle_source_chargeable(
  context: &PortalContext,
  resource: &EventResource,
) -> PortalResult<()> {
  let Some(reference) =
    PaymentSourceReference::read_by_source_id(&mut context.pool(), &resource.id).await?
  else {
    tracing::warn!("source.chargeable for unknown source {}", resource.id);
    return Ok(());
  };
  if reference.status != SourceStatus::Pending {
    tracing::debug!(
      "Ignoring source.chargeable replay for {} in state {:?}",
      resource.id,
      reference.status
    );
    return Ok(());
  }

  let snapshot = DraftSnapshot::from_json(reference.draft.clone())?;
  let description = payment_description(snapshot.kind)?;
  context
    .paymongo()
    .create_payment(&resource.id, reference.amount, description)
    .await?;
  PaymentSourceReference::set_status_by_source_id(
    &mut context.pool(),
    &resource.id,
    SourceStatus::Chargeable,
  )
  .await?;
  Ok(())
}

/// True for failures a retry can never fix: the processor keeps
/// redelivering an event until it sees a 200, so these get acknowledged
/// and logged instead of surfaced as an error response. Storage failures
/// are transient and still bubble up for redelivery.
fn acknowledged_without_retry(error: &PortalError) -> bool {
  matches!(
    error.error_type,
    PortalErrorType::PaymentNotConfirmed | PortalErrorType::InvalidWebhookPayload
  )
}

async fn handle_payment_paid(context: &PortalContext, resource: &EventResource) -> PortalResult<()> {
  let Some(source_id) = resource.attributes.source.as_ref().map(|s| s.id.clone()) else {
    tracing::warn!("payment.paid event {} without a source", resource.id);
    return Ok(());
  };
  let Some(reference) =
    PaymentSourceReference::read_by_source_id(&mut context.pool(), &source_id).await?
  else {
    tracing::warn!("payment.paid for unknown source {source_id}");
    return Ok(());
  };

  let snapshot = match DraftSnapshot::from_json(reference.draft.clone()) {
    Ok(snapshot) => snapshot,
    Err(e) if acknowledged_without_retry(&e) => {
      tracing::warn!("Dropping payment.paid for {source_id}: {e}");
      return Ok(());
    }
    Err(e) => return Err(e),
  };
  let paid_with = PaidWith {
    payment_id: resource.id.clone(),
    method: reference.method,
  };
  // Idempotent: if the client-side flow already finalized this payment,
  // the unique index hands the existing record back.
  if let Err(e) = finalize_document_review(
    context,
    context.paymongo(),
    reference.owner_id,
    snapshot,
    paid_with,
  )
  .await
  {
    if acknowledged_without_retry(&e) {
      tracing::warn!("Dropping payment.paid for {source_id}: {e}");
      return Ok(());
    }
    return Err(e);
  }
  PaymentSourceReference::set_status_by_source_id(
    &mut context.pool(),
    &source_id,
    SourceStatus::Consumed,
  )
  .await?;
  Ok(())
}

async fn handle_payment_failed(
  context: &PortalContext,
  resource: &EventResource,
) -> PortalResult<()> {
  let Some(source_id) = resource.attributes.source.as_ref().map(|s| s.id.clone()) else {
    tracing::warn!("payment.failed event {} without a source", resource.id);
    return Ok(());
  };
  if PaymentSourceReference::read_by_source_id(&mut context.pool(), &source_id)
    .await?
    .is_none()
  {
    tracing::warn!("payment.failed for unknown source {source_id}");
    return Ok(());
  }
  PaymentSourceReference::set_status_by_source_id(
    &mut context.pool(),
    &source_id,
    SourceStatus::Failed,
  )
  .await?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_parse_payment_paid_event() {
    let raw = r#"{
      "data": {
        "id": "evt_1",
        "type": "event",
        "attributes": {
          "type": "payment.paid",
          "data": {
            "id": "pay_xyz",
            "type": "payment",
            "attributes": {
              "amount": 50000,
              "status": "paid",
              "source": { "id": "src_abc", "type": "source" }
            }
          }
        }
      }
    }"#;
    let envelope: WebhookEnvelope = serde_json::from_str(raw).expect("parse event");
    let attributes = envelope.data.attributes;
    assert_eq!("payment.paid", attributes.kind);
    assert_eq!("pay_xyz", attributes.data.id);
    assert_eq!(
      "src_abc",
      attributes.data.attributes.source.expect("source ref").id
    );
  }

  #[test]
  fn test_parse_source_chargeable_event() {
    let raw = r#"{
      "data": {
        "attributes": {
          "type": "source.chargeable",
          "data": {
            "id": "src_abc",
            "attributes": { "amount": 50000, "status": "chargeable" }
          }
        }
      }
    }"#;
    let envelope: WebhookEnvelope = serde_json::from_str(raw).expect("parse event");
    let attributes = envelope.data.attributes;
    assert_eq!("source.chargeable", attributes.kind);
    assert_eq!("src_abc", attributes.data.id);
    assert_eq!(None, attributes.data.attributes.source.map(|s| s.id));
  }

  #[test]
  fn test_unconfirmed_payment_is_acknowledged_not_retried() {
    assert!(acknowledged_without_retry(
      &PortalErrorType::PaymentNotConfirmed.into()
    ));
    assert!(acknowledged_without_retry(
      &PortalErrorType::InvalidWebhookPayload.into()
    ));
    assert!(!acknowledged_without_retry(
      &PortalErrorType::DatabaseError.into()
    ));
  }

  #[test]
  fn test_unknown_event_still_parses() {
    let raw = r#"{
      "data": {
        "attributes": {
          "type": "checkout_session.payment.paid",
          "data": { "id": "cs_1" }
        }
      }
    }"#;
    let envelope: WebhookEnvelope = serde_json::from_str(raw).expect("parse event");
    assert_eq!("checkout_session.payment.paid", envelope.data.attributes.kind);
  }
}
