use actix_web::web::{Data, Json, Path};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_schema::newtypes::ConsultationId;
use lexportal_db_views_submission::{api::ConsultationResponse, ConsultationView};
use lexportal_utils::error::PortalResult;

#[tracing::instrument(skip(context))]
pub async fn get_consultation(
  id: Path<ConsultationId>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<ConsultationResponse>> {
  let consultation_view =
    ConsultationView::read(&mut context.pool(), id.into_inner(), owner.0).await?;
  Ok(Json(ConsultationResponse { consultation_view }))
}
