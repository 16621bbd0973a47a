use actix_web::web::{Data, Json};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_schema::source::document_review::DocumentReview;
use lexportal_db_views_submission::api::ListDocumentReviewsResponse;
use lexportal_utils::error::PortalResult;

#[tracing::instrument(skip(context))]
pub async fn list_document_reviews(
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<ListDocumentReviewsResponse>> {
  let document_reviews = DocumentReview::list_for_owner(&mut context.pool(), owner.0).await?;
  Ok(Json(ListDocumentReviewsResponse { document_reviews }))
}
