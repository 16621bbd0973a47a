//! Confirmation emails sent when a submission is finalized. Dispatch is
//! fire-and-forget from the caller's point of view, a failed send never
//! fails the submission itself.
use crate::{escape_html, send_email};
use lexportal_db_schema::source::{consultation::Consultation, document_review::DocumentReview};
use lexportal_db_schema_file::enums::DocumentType;
use lexportal_utils::{error::PortalResult, settings::structs::Settings};

fn document_type_label(document_type: DocumentType) -> &'static str {
  match document_type {
    DocumentType::BusinessAgreement => "business agreement",
    DocumentType::Lease => "lease agreement",
    DocumentType::EmploymentContract => "employment contract",
    DocumentType::Other => "document",
  }
}

fn footer(settings: &Settings) -> String {
  format!(
    r#"<div style="text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; color: #777; font-size: 12px;">
      <p>This is an automated message. Please do not reply to this email.</p>
      <p>{}</p>
    </div>"#,
    escape_html(&settings.hostname)
  )
}

pub fn consultation_received_body(consultation: &Consultation, settings: &Settings) -> String {
  let name = escape_html(&consultation.name);
  let dashboard = format!("{}/dashboard", settings.get_protocol_and_hostname());
  format!(
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
      <h2 style="color: #333; text-align: center;">Your Legal Inquiry Has Been Received</h2>
      <p>Dear {name},</p>
      <p>Thank you for submitting your legal inquiry. Our legal team will review it within 24 hours and reach out by email or phone to discuss your case in more detail.</p>
      <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 20px 0;">
        <p style="margin: 0;"><strong>What happens next?</strong></p>
        <ol style="margin-top: 10px; padding-left: 20px;">
          <li>Our legal team reviews your inquiry (within 24 hours)</li>
          <li>We'll send you a fixed-fee quote based on your needs</li>
          <li>Once you accept, we'll schedule a video consultation</li>
        </ol>
      </div>
      <p>You can follow the status of your request at <a href="{dashboard}">your dashboard</a>.</p>
      <p>Best regards,<br>The Legal Team</p>
      {footer}
    </div>"#,
    footer = footer(settings),
  )
}

pub fn document_review_received_body(review: &DocumentReview, settings: &Settings) -> String {
  let name = escape_html(&review.name);
  let label = document_type_label(review.document_type);
  let dashboard = format!("{}/dashboard", settings.get_protocol_and_hostname());
  format!(
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
      <h2 style="color: #333; text-align: center;">Document Review Request Received</h2>
      <p>Dear {name},</p>
      <p>Thank you for submitting your {label} for review. Our legal team will carefully analyze your document and provide detailed insights and recommendations.</p>
      <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px; margin: 20px 0;">
        <p style="margin: 0;"><strong>What to expect:</strong></p>
        <ul style="margin-top: 10px; padding-left: 20px;">
          <li>Document review typically takes 48 hours</li>
          <li>You'll receive an email notification once the review is complete</li>
          <li>A comprehensive review report will be available in your dashboard</li>
        </ul>
      </div>
      <p>You can check the status anytime at <a href="{dashboard}">your dashboard</a>.</p>
      <p>Best regards,<br>The Legal Team</p>
      {footer}
    </div>"#,
    footer = footer(settings),
  )
}

pub async fn send_consultation_received_email(
  consultation: &Consultation,
  settings: &Settings,
) -> PortalResult<()> {
  let body = consultation_received_body(consultation, settings);
  send_email(
    "We Have Received Your Inquiry",
    &consultation.email,
    &consultation.name,
    &body,
    settings,
  )
  .await
}

pub async fn send_document_review_received_email(
  review: &DocumentReview,
  settings: &Settings,
) -> PortalResult<()> {
  let body = document_review_received_body(review, settings);
  send_email(
    "Your Document Review Request Received",
    &review.email,
    &review.name,
    &body,
    settings,
  )
  .await
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;
  use lexportal_db_schema::newtypes::{DocumentReviewId, LocalUserId};
  use lexportal_db_schema_file::enums::{PaymentMethod, SubmissionStatus};

  fn sample_review() -> DocumentReview {
    DocumentReview {
      id: DocumentReviewId(1),
      owner_id: LocalUserId(7),
      name: "Maria <Santos>".to_string(),
      email: "maria@example.com".to_string(),
      phone: None,
      document_type: DocumentType::Lease,
      additional_details: None,
      document_name: "lease.pdf".to_string(),
      document_url: "/files/x".to_string(),
      document_content_type: "application/pdf".to_string(),
      document_size: 100,
      status: SubmissionStatus::Pending,
      paid: true,
      payment_id: "pay_1".to_string(),
      payment_amount: 500.0,
      payment_method: PaymentMethod::Gcash,
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  #[test]
  fn test_review_body_mentions_document_type() {
    let settings = Settings::default();
    let body = document_review_received_body(&sample_review(), &settings);
    assert!(body.contains("lease agreement"));
    // client-supplied names are escaped
    assert!(body.contains("Maria &lt;Santos&gt;"));
    assert!(!body.contains("Maria <Santos>"));
  }
}
