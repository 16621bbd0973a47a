use lexportal_db_schema::newtypes::LocalUserId;
use lexportal_utils::error::{PortalErrorType, PortalResult};
use std::path::{Path, PathBuf};

pub mod delete;
pub mod download;
pub mod upload;

/// Uploads are segregated by the workflow they belong to.
pub const UPLOAD_CATEGORIES: [&str; 2] = ["consultation", "document-review"];

pub fn check_category(category: &str) -> PortalResult<()> {
  if UPLOAD_CATEGORIES.contains(&category) {
    Ok(())
  } else {
    Err(PortalErrorType::InvalidBodyField.into())
  }
}

/// Strip any path components and keep only a-zA-Z0-9 . _ -
pub fn sanitize_filename(name: &str) -> String {
  let name = name.trim();
  let base = Path::new(name)
    .file_name()
    .unwrap_or_default()
    .to_string_lossy();
  base
    .chars()
    .map(|c| match c {
      'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' => c,
      _ => '-',
    })
    .collect()
}

pub fn owner_files_dir(upload_dir: &str, category: &str, owner_id: LocalUserId) -> PathBuf {
  PathBuf::from(upload_dir)
    .join(category)
    .join(owner_id.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_sanitize_filename() {
    assert_eq!("lease.pdf", sanitize_filename("lease.pdf"));
    assert_eq!("passwd", sanitize_filename("../../etc/passwd"));
    assert_eq!("my-contract--final-.pdf", sanitize_filename("my contract (final).pdf"));
  }

  #[test]
  fn test_category_allow_list() {
    assert!(check_category("consultation").is_ok());
    assert!(check_category("document-review").is_ok());
    assert!(check_category("..").is_err());
    assert!(check_category("avatars").is_err());
  }
}
