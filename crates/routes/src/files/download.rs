use crate::files::{check_category, owner_files_dir, sanitize_filename};
use actix_web::{
  web::{Data, Path},
  HttpResponse,
};
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_utils::error::{PortalErrorType, PortalResult};

/// Owners can only fetch their own files; the owner id in the URL is
/// ignored in favor of the authenticated one.
#[tracing::instrument(skip(context))]
pub async fn get_file(
  path: Path<(String, i32, String)>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<HttpResponse> {
  let (category, _path_owner, filename) = path.into_inner();
  check_category(&category)?;
  let filename = sanitize_filename(&filename);

  let file_path =
    owner_files_dir(&context.settings().files.upload_dir, &category, owner.0).join(&filename);
  if !file_path.exists() {
    return Err(PortalErrorType::FileNotFound.into());
  }

  let bytes = tokio::fs::read(&file_path).await?;
  Ok(
    HttpResponse::Ok()
      .append_header((
        "Content-Disposition",
        format!("attachment; filename=\"{filename}\""),
      ))
      .content_type("application/octet-stream")
      .body(bytes),
  )
}
