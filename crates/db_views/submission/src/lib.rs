use lexportal_db_schema::{
  newtypes::LocalUserId,
  source::{
    consultation::{Consultation, ConsultationDocument},
    document_review::DocumentReview,
  },
};
use serde::{Deserialize, Serialize};

pub mod api;
pub mod impls;
pub mod validator;

/// A consultation together with its uploaded attachments.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationView {
  pub consultation: Consultation,
  pub documents: Vec<ConsultationDocument>,
}

/// One finalized submission of either workflow, as sent to clients. The
/// `workflow` tag lets the frontend narrow the payload without guessing
/// from field presence.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(tag = "workflow", rename_all = "snake_case")]
pub enum SubmissionRecord {
  Consultation(ConsultationView),
  DocumentReview { document_review: DocumentReview },
}

impl SubmissionRecord {
  pub fn owner_id(&self) -> LocalUserId {
    match self {
      SubmissionRecord::Consultation(view) => view.consultation.owner_id,
      SubmissionRecord::DocumentReview { document_review } => document_review.owner_id,
    }
  }
}
