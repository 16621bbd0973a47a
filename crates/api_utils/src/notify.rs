use crate::context::PortalContext;
use lexportal_db_schema::source::{consultation::Consultation, document_review::DocumentReview};
use lexportal_email::submission::{
  send_consultation_received_email,
  send_document_review_received_email,
};

/// Queue the consultation confirmation email. Failures are logged and
/// swallowed, a submission never fails because the relay was down.
pub fn notify_consultation_received(consultation: Consultation, context: &PortalContext) {
  let settings = context.settings();
  if settings.email.is_none() {
    tracing::debug!("No email setup, skipping consultation confirmation");
    return;
  }
  tokio::spawn(async move {
    if let Err(e) = send_consultation_received_email(&consultation, settings).await {
      tracing::warn!("Failed to send consultation confirmation: {e}");
    }
  });
}

pub fn notify_document_review_received(review: DocumentReview, context: &PortalContext) {
  let settings = context.settings();
  if settings.email.is_none() {
    tracing::debug!("No email setup, skipping document review confirmation");
    return;
  }
  tokio::spawn(async move {
    if let Err(e) = send_document_review_received_email(&review, settings).await {
      tracing::warn!("Failed to send document review confirmation: {e}");
    }
  });
}
