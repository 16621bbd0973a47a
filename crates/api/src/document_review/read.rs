use actix_web::web::{Data, Json, Path};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_schema::newtypes::DocumentReviewId;
use lexportal_db_views_submission::{api::SubmissionRecordResponse, SubmissionRecord};
use lexportal_utils::error::PortalResult;

#[tracing::instrument(skip(context))]
pub async fn get_document_review(
  id: Path<DocumentReviewId>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<SubmissionRecordResponse>> {
  let submission =
    SubmissionRecord::read_document_review(&mut context.pool(), id.into_inner(), owner.0).await?;
  Ok(Json(SubmissionRecordResponse { submission }))
}
