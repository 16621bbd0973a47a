use crate::files::{check_category, owner_files_dir, sanitize_filename};
use actix_web::web::{Data, Json, Path};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_utils::error::{PortalErrorType, PortalResult};
use serde::Serialize;
use tokio::fs;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
  pub success: bool,
}

/// Remove a file the owner uploaded but no longer wants attached, e.g.
/// after retreating to the upload step and picking another document.
#[tracing::instrument(skip(context))]
pub async fn delete_file(
  path: Path<(String, String)>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<SuccessResponse>> {
  let (category, filename) = path.into_inner();
  check_category(&category)?;
  let filename = sanitize_filename(&filename);
  if filename.is_empty() {
    return Err(PortalErrorType::InvalidBodyField.into());
  }

  let target =
    owner_files_dir(&context.settings().files.upload_dir, &category, owner.0).join(&filename);
  if !target.exists() {
    return Err(PortalErrorType::FileNotFound.into());
  }

  match fs::remove_file(&target).await {
    Ok(_) => Ok(Json(SuccessResponse { success: true })),
    Err(_) => Err(PortalErrorType::CouldntDeleteFile.into()),
  }
}
