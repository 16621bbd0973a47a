use actix_web::web::{Data, Json};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_views_submission::{api::ListConsultationsResponse, ConsultationView};
use lexportal_utils::error::PortalResult;

#[tracing::instrument(skip(context))]
pub async fn list_consultations(
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<ListConsultationsResponse>> {
  let consultations = ConsultationView::list_for_owner(&mut context.pool(), owner.0).await?;
  Ok(Json(ListConsultationsResponse { consultations }))
}
