pub mod consultation;
pub mod document_review;
pub mod payment_source_reference;
pub mod secret;
