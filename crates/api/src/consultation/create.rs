use actix_web::web::{Data, Json};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_views_submission::{
  api::{ConsultationResponse, CreateConsultation},
  validator::ValidCreateConsultation,
};
use lexportal_utils::error::PortalResult;
use lexportal_workflow::{finalize::finalize_consultation, DraftSnapshot};

/// Submit a consultation request. Free, so the draft finalizes in the
/// same request.
#[tracing::instrument(skip(context))]
pub async fn create_consultation(
  data: Json<CreateConsultation>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<ConsultationResponse>> {
  let valid = ValidCreateConsultation::try_from(data.into_inner())?;
  let snapshot = DraftSnapshot::from(valid);
  let consultation_view = finalize_consultation(&context, owner.0, snapshot).await?;
  Ok(Json(ConsultationResponse { consultation_view }))
}
