use actix_web::web::{Data, Json};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_schema::{
  source::payment_source_reference::{PaymentSourceReference, PaymentSourceReferenceInsertForm},
  traits::Crud,
};
use lexportal_db_schema_file::enums::PaymentMethod;
use lexportal_utils::error::{PortalErrorType, PortalResult};
use lexportal_workflow::api::{
  payment_description,
  CreatePayment,
  CreatePaymentResponse,
  ValidCreatePayment,
};
use std::collections::HashMap;

/// Start a payment for a completed draft. Card gets a payment intent the
/// client confirms in place; the redirect wallets get a checkout URL, but
/// only after the draft has been staged server-side so the webhook can
/// finish the submission without the client.
#[tracing::instrument(skip(context, data))]
pub async fn create_payment(
  data: Json<CreatePayment>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<CreatePaymentResponse>> {
  let valid = ValidCreatePayment::try_from(data.into_inner())?;
  let amount = valid.amount_pesos();
  let description = payment_description(valid.0.draft.kind)?;

  match valid.0.method {
    PaymentMethod::Card => {
      let mut metadata = HashMap::new();
      metadata.insert("ownerId".to_string(), owner.0.to_string());
      let intent = context
        .paymongo()
        .create_intent(amount, description, metadata)
        .await?;
      Ok(Json(CreatePaymentResponse::Intent {
        payment_intent_id: intent.id,
        client_key: intent.attributes.client_key,
      }))
    }
    method => {
      let base = context.settings().get_protocol_and_hostname();
      let success_url = format!("{base}/payment-success");
      let failure_url = format!("{base}/payment-failure");
      let source = context
        .paymongo()
        .create_source(amount, method, &success_url, &failure_url)
        .await?;
      let checkout_url = source
        .attributes
        .redirect
        .checkout_url
        .ok_or(PortalErrorType::MissingCheckoutUrl)?;

      // Stage the draft before handing out the checkout URL. Once the
      // browser leaves, this row is the only place the draft exists.
      let form = PaymentSourceReferenceInsertForm::new(
        source.id.clone(),
        owner.0,
        method,
        amount,
        valid.0.draft.to_json()?,
      );
      PaymentSourceReference::create(&mut context.pool(), &form).await?;

      Ok(Json(CreatePaymentResponse::Redirect {
        source_id: source.id,
        checkout_url,
      }))
    }
  }
}
