use crate::files::{check_category, owner_files_dir, sanitize_filename};
use actix_multipart::Multipart;
use actix_web::web::{Data, Json, Path};
use futures_util::TryStreamExt;
use lexportal_api_utils::{context::PortalContext, utils::AuthedOwner};
use lexportal_db_views_submission::api::UploadedDocument;
use lexportal_utils::{
  error::{PortalErrorType, PortalResult},
  utils::validation::{check_upload_content_type, MAX_UPLOAD_BYTES},
};
use tokio::{fs, io::AsyncWriteExt};
use uuid::Uuid;

/// Accept one client document and store it under the owner's directory.
/// The response is exactly the reference a draft attaches later, so the
/// frontend never has to reshape it.
#[tracing::instrument(skip(context, payload))]
pub async fn upload_file(
  mut payload: Multipart,
  category: Path<String>,
  context: Data<PortalContext>,
  owner: AuthedOwner,
) -> PortalResult<Json<UploadedDocument>> {
  let category = category.into_inner();
  check_category(&category)?;

  // Only the first file field is considered
  while let Some(item) = payload
    .try_next()
    .await
    .map_err(|_| PortalErrorType::InvalidBodyField)?
  {
    let content_disposition = item.content_disposition().cloned();
    let field_name = content_disposition
      .as_ref()
      .and_then(|cd| cd.get_name())
      .unwrap_or("")
      .to_string();
    if field_name != "file" {
      continue;
    }

    let content_type = item
      .content_type()
      .ok_or(PortalErrorType::NoContentTypeHeader)?
      .essence_str()
      .to_string();
    check_upload_content_type(&content_type)?;

    let original = content_disposition
      .and_then(|cd| cd.get_filename().map(ToString::to_string))
      .unwrap_or_else(|| "file".to_string());
    let filename = format!("{}-{}", Uuid::new_v4(), sanitize_filename(&original));

    let dir = owner_files_dir(&context.settings().files.upload_dir, &category, owner.0);
    fs::create_dir_all(&dir).await?;
    let target = dir.join(&filename);
    let mut file = fs::File::create(&target).await?;

    let mut field = item;
    let mut size: u64 = 0;
    while let Some(chunk) = field
      .try_next()
      .await
      .map_err(|_| PortalErrorType::InvalidBodyField)?
    {
      size += chunk.len() as u64;
      if size > MAX_UPLOAD_BYTES {
        // Remove the partially written file
        let _ = fs::remove_file(&target).await;
        return Err(PortalErrorType::FileTooLarge.into());
      }
      file.write_all(&chunk).await?;
    }

    let url = format!("/api/v4/files/{category}/{}/{filename}", owner.0);
    return Ok(Json(UploadedDocument {
      name: sanitize_filename(&original),
      url,
      content_type,
      size: size as i64,
    }));
  }

  Err(PortalErrorType::InvalidBodyField.into())
}
