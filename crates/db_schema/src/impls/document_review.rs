use crate::{
  newtypes::{DocumentReviewId, LocalUserId},
  source::document_review::{DocumentReview, DocumentReviewInsertForm, DocumentReviewUpdateForm},
  traits::Crud,
  utils::{get_conn, DbPool},
};
use diesel::{
  result::{DatabaseErrorKind, Error as DieselError},
  ExpressionMethods, OptionalExtension, QueryDsl,
};
use diesel_async::RunQueryDsl;
use lexportal_db_schema_file::schema::document_review;
use lexportal_utils::error::{PortalErrorExt, PortalErrorType, PortalResult};

impl Crud for DocumentReview {
  type InsertForm = DocumentReviewInsertForm;
  type UpdateForm = DocumentReviewUpdateForm;
  type IdType = DocumentReviewId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::insert_into(document_review::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::CouldntCreateDocumentReview)
  }

  async fn read(pool: &mut DbPool<'_>, id: Self::IdType) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    document_review::table
      .find(id)
      .first::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::NotFound)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::update(document_review::table.find(id))
      .set(form)
      .get_result::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)
  }
}

impl DocumentReview {
  /// Insert guarded by the unique index on `payment_id`. A conflicting
  /// insert means another request (sync confirmation vs. webhook
  /// redelivery) finalized this payment first; the loser of that race
  /// reads and returns the winner's row. The boolean reports whether
  /// this call created the row.
  pub async fn create_idempotent(
    pool: &mut DbPool<'_>,
    form: &DocumentReviewInsertForm,
  ) -> PortalResult<(Self, bool)> {
    let conn = &mut get_conn(pool).await?;
    match diesel::insert_into(document_review::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
    {
      Ok(created) => Ok((created, true)),
      Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
        let existing = document_review::table
          .filter(document_review::payment_id.eq(&form.payment_id))
          .first::<Self>(conn)
          .await
          .with_portal_type(PortalErrorType::DatabaseError)?;
        Ok((existing, false))
      }
      Err(e) => Err(e).with_portal_type(PortalErrorType::CouldntCreateDocumentReview),
    }
  }

  pub async fn read_by_payment_id(
    pool: &mut DbPool<'_>,
    payment_id: &str,
  ) -> PortalResult<Option<Self>> {
    let conn = &mut get_conn(pool).await?;
    document_review::table
      .filter(document_review::payment_id.eq(payment_id))
      .first::<Self>(conn)
      .await
      .optional()
      .with_portal_type(PortalErrorType::DatabaseError)
  }

  /// Document reviews for one owner, newest first.
  pub async fn list_for_owner(
    pool: &mut DbPool<'_>,
    owner_id: LocalUserId,
  ) -> PortalResult<Vec<Self>> {
    let conn = &mut get_conn(pool).await?;
    document_review::table
      .filter(document_review::owner_id.eq(owner_id))
      .order_by(document_review::created_at.desc())
      .load::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::build_db_pool_for_tests;
  use lexportal_db_schema_file::enums::{DocumentType, PaymentMethod};
  use pretty_assertions::assert_eq;
  use serial_test::serial;

  fn review_form(payment_id: &str) -> DocumentReviewInsertForm {
    DocumentReviewInsertForm::new(
      LocalUserId(7001),
      "Ana Reyes".into(),
      "ana@example.com".into(),
      DocumentType::Lease,
      "lease-agreement.pdf".into(),
      "uploads/lease-agreement.pdf".into(),
      "application/pdf".into(),
      48_213,
      true,
      payment_id.into(),
      500.0,
      PaymentMethod::Card,
    )
  }

  #[tokio::test]
  #[serial]
  async fn test_create_idempotent_returns_existing_row_on_replay() -> PortalResult<()> {
    let pool = &build_db_pool_for_tests();
    let pool = &mut pool.into();

    let form = review_form("pay_replay_idempotency");
    let (created, inserted) = DocumentReview::create_idempotent(pool, &form).await?;
    assert!(inserted);

    let (replayed, inserted_again) = DocumentReview::create_idempotent(pool, &form).await?;
    assert!(!inserted_again);
    assert_eq!(created.id, replayed.id);
    assert_eq!(created.payment_id, replayed.payment_id);

    let conn = &mut get_conn(pool).await?;
    diesel::delete(document_review::table.find(created.id))
      .execute(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)?;
    Ok(())
  }
}
