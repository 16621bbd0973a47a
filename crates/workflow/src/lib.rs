pub mod api;
pub mod draft;
pub mod finalize;

pub use draft::{DraftSnapshot, SubmissionDraft, WorkflowKind};
pub use finalize::{PaidWith, PaymentStatusProbe};
