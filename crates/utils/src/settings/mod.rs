use crate::{
  error::{PortalError, PortalErrorExt, PortalErrorType, PortalResult},
  location_info,
};
use std::{env, fs, sync::LazyLock};
use structs::Settings;

pub mod structs;

const DEFAULT_CONFIG_FILE: &str = "config/config.hjson";

pub static SETTINGS: LazyLock<Settings> = LazyLock::new(|| {
  if env::var("LEXPORTAL_INITIALIZE_WITH_DEFAULT_SETTINGS").is_ok() {
    println!("Initializing with default settings, as LEXPORTAL_INITIALIZE_WITH_DEFAULT_SETTINGS was set");
    Settings::default()
  } else {
    Settings::init().expect("Failed to load settings file, see documentation")
  }
});

impl Settings {
  /// Reads config from configuration file.
  fn init() -> PortalResult<Self> {
    let path = Self::get_config_location();
    let plain = fs::read_to_string(&path)
      .map_err(|e| anyhow::anyhow!("No config file found at {path}: {e}"))?;
    let config = deser_hjson::from_str::<Settings>(&plain)
      .with_portal_type(PortalErrorType::SerializationFailed)?;
    if config.hostname == Settings::default().hostname {
      return Err(anyhow::anyhow!("Hostname variable is not set!").into());
    }

    Ok(config)
  }

  pub fn get_config_location() -> String {
    env::var("LEXPORTAL_CONFIG_LOCATION").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
  }

  pub fn get_protocol_string(&self) -> &'static str {
    if self.tls_enabled {
      "https"
    } else {
      "http"
    }
  }

  /// Returns something like `http://localhost` or `https://portal.example.com`,
  /// with the correct protocol and hostname.
  pub fn get_protocol_and_hostname(&self) -> String {
    format!("{}://{}", self.get_protocol_string(), self.hostname)
  }

  /// When running the server, this is the hostname without the port.
  pub fn get_hostname_without_port(&self) -> PortalResult<String> {
    Ok(
      self
        .hostname
        .split(':')
        .next()
        .ok_or(PortalError::from(PortalErrorType::Unknown(location_info!())))?
        .to_string(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::structs::Settings;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_default_settings_protocol() {
    let mut settings = Settings::default();
    assert_eq!("https://unset", settings.get_protocol_and_hostname());

    settings.tls_enabled = false;
    settings.hostname = "localhost:8536".into();
    assert_eq!("http://localhost:8536", settings.get_protocol_and_hostname());
    assert_eq!(
      "localhost",
      settings.get_hostname_without_port().unwrap_or_default()
    );
  }

  #[test]
  fn test_parse_config_hjson() {
    let hjson = r#"
      {
        hostname: portal.example.com
        paymongo: {
          secret_key: "sk_test_123"
        }
      }
    "#;
    let settings = deser_hjson::from_str::<Settings>(hjson).expect("parse test config");
    assert_eq!("portal.example.com", settings.hostname);
    assert_eq!("sk_test_123", settings.paymongo.secret_key);
    assert_eq!(
      "https://api.paymongo.com/v1/",
      settings.paymongo.api_url.as_str()
    );
  }
}
