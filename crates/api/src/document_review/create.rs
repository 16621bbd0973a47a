use actix_web::web::{Data, Json};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_views_submission::{
  api::{CreateDocumentReview, DocumentReviewResponse},
  validator::ValidCreateDocumentReview,
};
use lexportal_utils::error::PortalResult;
use lexportal_workflow::{finalize::finalize_document_review, DraftSnapshot, PaidWith};

/// Finalize a document review after a card payment. The claimed payment
/// is re-verified against the gateway before anything is stored; a
/// replayed payment id returns the existing record with `created` false.
#[tracing::instrument(skip(context))]
pub async fn create_document_review(
  data: Json<CreateDocumentReview>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<DocumentReviewResponse>> {
  let valid = ValidCreateDocumentReview::try_from(data.into_inner())?;
  let paid_with = PaidWith {
    payment_id: valid.0.payment_id.clone(),
    method: valid.0.payment_method,
  };
  let snapshot = DraftSnapshot::from(valid);
  let (document_review, created) =
    finalize_document_review(&context, context.paymongo(), owner.0, snapshot, paid_with).await?;
  Ok(Json(DocumentReviewResponse {
    document_review,
    created,
  }))
}
