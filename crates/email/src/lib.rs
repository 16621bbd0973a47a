use lettre::{
  message::{Mailbox, MultiPart},
  transport::smtp::{authentication::Credentials, extension::ClientId},
  Address,
  AsyncSmtpTransport,
  AsyncTransport,
  Message,
  Tokio1Executor,
};
use lexportal_utils::{
  error::{PortalErrorExt, PortalErrorType, PortalResult},
  settings::structs::Settings,
};
use std::str::FromStr;

pub mod submission;

/// Send one HTML email through the configured SMTP relay. Errors out with
/// `NoEmailSetup` when the email section is absent from the config.
pub async fn send_email(
  subject: &str,
  to_email: &str,
  to_username: &str,
  html: &str,
  settings: &Settings,
) -> PortalResult<()> {
  let email_config = settings
    .email
    .clone()
    .ok_or(PortalErrorType::NoEmailSetup)?;

  let (smtp_server, smtp_port) = {
    let email_and_port = email_config.smtp_server.split(':').collect::<Vec<&str>>();
    let email = *email_and_port
      .first()
      .ok_or(PortalErrorType::EmailSendFailed)?;
    let port = email_and_port
      .get(1)
      .and_then(|p| p.parse::<u16>().ok())
      .ok_or(PortalErrorType::EmailSendFailed)?;
    (email, port)
  };

  let from = email_config
    .smtp_from_address
    .parse::<Mailbox>()
    .with_portal_type(PortalErrorType::EmailSendFailed)?;
  let to = Mailbox::new(
    Some(to_username.to_string()),
    Address::from_str(to_email).with_portal_type(PortalErrorType::EmailSendFailed)?,
  );

  let plain_text = html_to_plain(html);
  let message = Message::builder()
    .from(from)
    .to(to)
    .subject(subject)
    .multipart(MultiPart::alternative_plain_html(
      plain_text,
      html.to_string(),
    ))
    .with_portal_type(PortalErrorType::EmailSendFailed)?;

  let mut builder = match email_config.tls_type.as_str() {
    "starttls" => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(smtp_server)
      .with_portal_type(PortalErrorType::EmailSendFailed)?,
    "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(smtp_server)
      .with_portal_type(PortalErrorType::EmailSendFailed)?,
    _ => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(smtp_server),
  };
  builder = builder
    .hello_name(ClientId::Domain(settings.hostname.clone()))
    .port(smtp_port);
  if let (Some(login), Some(password)) =
    (email_config.smtp_login, email_config.smtp_password)
  {
    builder = builder.credentials(Credentials::new(login, password));
  }
  let mailer = builder.build();

  mailer
    .send(message)
    .await
    .with_portal_type(PortalErrorType::EmailSendFailed)?;
  Ok(())
}

/// Crude fallback part for clients that refuse HTML.
fn html_to_plain(html: &str) -> String {
  let mut out = String::with_capacity(html.len());
  let mut in_tag = false;
  for c in html.chars() {
    match c {
      '<' => in_tag = true,
      '>' => in_tag = false,
      c if !in_tag => out.push(c),
      _ => {}
    }
  }
  out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn escape_html(input: &str) -> String {
  input
    .replace('&', "&amp;")
    .replace('<', "&lt;")
    .replace('>', "&gt;")
    .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_html_to_plain() {
    assert_eq!(
      "Hello Maria, we received your inquiry.",
      html_to_plain("<p>Hello <b>Maria</b>,</p>\n<p>we received your inquiry.</p>")
    );
  }

  #[test]
  fn test_escape_html() {
    assert_eq!("Fish &amp; Chips &lt;Ltd&gt;", escape_html("Fish & Chips <Ltd>"));
  }
}
