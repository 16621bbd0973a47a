use crate::{ConsultationView, SubmissionRecord};
use diesel::{BelongingToDsl, GroupedBy};
use diesel_async::RunQueryDsl;
use lexportal_db_schema::{
  newtypes::{ConsultationId, DocumentReviewId, LocalUserId},
  source::{
    consultation::{Consultation, ConsultationDocument},
    document_review::DocumentReview,
  },
  traits::Crud,
  utils::{get_conn, DbPool},
};
use lexportal_utils::error::{PortalErrorExt, PortalErrorType, PortalResult};

impl ConsultationView {
  /// Read one consultation, scoped to its owner. Someone else's id is
  /// indistinguishable from a missing one.
  pub async fn read(
    pool: &mut DbPool<'_>,
    id: ConsultationId,
    owner_id: LocalUserId,
  ) -> PortalResult<Self> {
    let consultation = Consultation::read(pool, id).await?;
    if consultation.owner_id != owner_id {
      return Err(PortalErrorType::NotFound.into());
    }
    let documents = ConsultationDocument::for_consultation(pool, id).await?;
    Ok(ConsultationView {
      consultation,
      documents,
    })
  }

  pub async fn list_for_owner(
    pool: &mut DbPool<'_>,
    owner_id: LocalUserId,
  ) -> PortalResult<Vec<Self>> {
    let consultations = Consultation::list_for_owner(pool, owner_id).await?;
    let conn = &mut get_conn(pool).await?;
    let documents = ConsultationDocument::belonging_to(&consultations)
      .load::<ConsultationDocument>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)?;
    Ok(
      documents
        .grouped_by(&consultations)
        .into_iter()
        .zip(consultations)
        .map(|(documents, consultation)| ConsultationView {
          consultation,
          documents,
        })
        .collect(),
    )
  }
}

impl SubmissionRecord {
  pub async fn read_document_review(
    pool: &mut DbPool<'_>,
    id: DocumentReviewId,
    owner_id: LocalUserId,
  ) -> PortalResult<Self> {
    let document_review = DocumentReview::read(pool, id).await?;
    if document_review.owner_id != owner_id {
      return Err(PortalErrorType::NotFound.into());
    }
    Ok(SubmissionRecord::DocumentReview { document_review })
  }
}
