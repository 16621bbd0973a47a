use crate::error::{PortalErrorType, PortalResult};

const NAME_MIN_LENGTH: usize = 2;
const NAME_MAX_LENGTH: usize = 100;
const PHONE_MIN_DIGITS: usize = 10;
const INQUIRY_MIN_LENGTH: usize = 50;
const INQUIRY_MAX_LENGTH: usize = 10000;
const ADDITIONAL_DETAILS_MAX_LENGTH: usize = 10000;

/// Maximum size of an uploaded client document.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Content types a client may attach to a submission: PDF, Word (legacy
/// and OOXML), JPEG and PNG.
pub const ALLOWED_UPLOAD_CONTENT_TYPES: [&str; 5] = [
  "application/pdf",
  "application/msword",
  "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
  "image/jpeg",
  "image/png",
];

pub fn is_valid_client_name(name: &str) -> PortalResult<()> {
  min_length_check(name.trim(), NAME_MIN_LENGTH, PortalErrorType::NameTooShort)?;
  max_length_check(name.trim(), NAME_MAX_LENGTH, PortalErrorType::NameTooShort)
}

/// A deliberately loose structural check, the source of truth for
/// deliverability is the confirmation email itself.
pub fn is_valid_email_address(email: &str) -> PortalResult<()> {
  let invalid = || PortalErrorType::InvalidEmailAddress(email.to_string());
  let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
  if local.is_empty() || domain.is_empty() || domain.contains('@') {
    return Err(invalid().into());
  }
  let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
  if host.is_empty() || tld.len() < 2 || email.contains(char::is_whitespace) {
    return Err(invalid().into());
  }
  Ok(())
}

/// Phone numbers arrive in whatever format the client typed; require at
/// least ten digits once separators are stripped.
pub fn is_valid_phone_number(phone: &str) -> PortalResult<()> {
  let digits = phone.chars().filter(char::is_ascii_digit).count();
  let separators_only = phone
    .chars()
    .all(|c| c.is_ascii_digit() || " +-()".contains(c));
  if digits >= PHONE_MIN_DIGITS && separators_only {
    Ok(())
  } else {
    Err(PortalErrorType::InvalidPhoneNumber.into())
  }
}

pub fn inquiry_length_check(inquiry: &str) -> PortalResult<()> {
  min_length_check(
    inquiry.trim(),
    INQUIRY_MIN_LENGTH,
    PortalErrorType::InquiryTooShort,
  )?;
  max_length_check(
    inquiry,
    INQUIRY_MAX_LENGTH,
    PortalErrorType::InvalidField("inquiry too long".to_string()),
  )
}

pub fn additional_details_length_check(details: &str) -> PortalResult<()> {
  max_length_check(
    details,
    ADDITIONAL_DETAILS_MAX_LENGTH,
    PortalErrorType::InvalidField("additional details too long".to_string()),
  )
}

/// Rejected files never reach storage: both checks run before the
/// attachment service is invoked.
pub fn check_upload_content_type(content_type: &str) -> PortalResult<()> {
  if ALLOWED_UPLOAD_CONTENT_TYPES.contains(&content_type) {
    Ok(())
  } else {
    Err(PortalErrorType::InvalidFileType(content_type.to_string()).into())
  }
}

pub fn check_upload_size(size: u64) -> PortalResult<()> {
  if size <= MAX_UPLOAD_BYTES {
    Ok(())
  } else {
    Err(PortalErrorType::FileTooLarge.into())
  }
}

/// Check minimum and maximum length of input string. If the string is too
/// short or too long, the corresponding error is returned.
///
/// HTML frontends specify maximum input length using `maxlength` attribute.
/// For consistency we use the same counting method (UTF-16 code units).
/// https://developer.mozilla.org/en-US/docs/Web/HTML/Attributes/maxlength
fn max_length_check(item: &str, max_length: usize, max_msg: PortalErrorType) -> PortalResult<()> {
  let len = item.encode_utf16().count();
  if len > max_length {
    Err(max_msg.into())
  } else {
    Ok(())
  }
}

fn min_length_check(item: &str, min_length: usize, min_msg: PortalErrorType) -> PortalResult<()> {
  let len = item.encode_utf16().count();
  if len < min_length {
    Err(min_msg.into())
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_valid_email_addresses() {
    assert!(is_valid_email_address("client@example.com").is_ok());
    assert!(is_valid_email_address("maria.santos+legal@firm.ph").is_ok());

    assert!(is_valid_email_address("no-at-sign").is_err());
    assert!(is_valid_email_address("@example.com").is_err());
    assert!(is_valid_email_address("client@").is_err());
    assert!(is_valid_email_address("client@nodot").is_err());
    assert!(is_valid_email_address("spa ce@example.com").is_err());
  }

  #[test]
  fn test_valid_phone_numbers() {
    assert!(is_valid_phone_number("09171234567").is_ok());
    assert!(is_valid_phone_number("+63 917 123 4567").is_ok());
    assert!(is_valid_phone_number("(02) 8123-4567 ext").is_err());
    assert!(is_valid_phone_number("12345").is_err());
  }

  #[test]
  fn test_inquiry_length() {
    assert!(inquiry_length_check("too short").is_err());
    assert!(inquiry_length_check(&"x".repeat(50)).is_ok());
  }

  #[test]
  fn test_upload_checks() {
    assert!(check_upload_content_type("application/pdf").is_ok());
    assert!(check_upload_content_type("image/png").is_ok());
    assert!(check_upload_content_type("application/x-msdownload").is_err());

    assert!(check_upload_size(MAX_UPLOAD_BYTES).is_ok());
    assert!(check_upload_size(MAX_UPLOAD_BYTES + 1).is_err());
  }

  #[test]
  fn test_client_name() {
    assert!(is_valid_client_name("Jo").is_ok());
    assert!(is_valid_client_name(" J ").is_err());
    assert!(is_valid_client_name(&"n".repeat(101)).is_err());
  }
}
