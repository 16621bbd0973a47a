pub mod consultation;
pub mod document_review;
pub mod subscription;
