use actix_web::{
  web::{Bytes, Data},
  HttpResponse,
};
use futures_util::StreamExt;
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_utils::error::PortalResult;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

/// Server-sent stream of the caller's finalized submissions. A client
/// waiting out a payment redirect holds this open instead of polling the
/// list endpoints.
#[tracing::instrument(skip(context))]
pub async fn subscribe_submissions(
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<HttpResponse> {
  let receiver = context.subscriptions().subscribe(owner.0);
  let stream = BroadcastStream::new(receiver).filter_map(|item| async move {
    match item {
      Ok(record) => match serde_json::to_string(&record) {
        Ok(json) => Some(Ok::<Bytes, actix_web::Error>(Bytes::from(format!(
          "event: submission\ndata: {json}\n\n"
        )))),
        Err(e) => {
          tracing::warn!("Dropping unserializable submission event: {e}");
          None
        }
      },
      // A lagged consumer loses the oldest events; it can refetch the
      // lists if the gap matters to it.
      Err(BroadcastStreamRecvError::Lagged(missed)) => {
        tracing::debug!("Subscription consumer lagged, skipped {missed} events");
        None
      }
    }
  });

  Ok(
    HttpResponse::Ok()
      .content_type("text/event-stream")
      .insert_header(("cache-control", "no-cache"))
      .streaming(stream),
  )
}
