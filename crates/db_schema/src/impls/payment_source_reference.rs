use crate::{
  newtypes::PaymentSourceReferenceId,
  source::payment_source_reference::{
    PaymentSourceReference, PaymentSourceReferenceInsertForm, PaymentSourceReferenceUpdateForm,
  },
  traits::Crud,
  utils::{get_conn, DbPool},
};
use chrono::Utc;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;
use lexportal_db_schema_file::{enums::SourceStatus, schema::payment_source_reference};
use lexportal_utils::error::{PortalErrorExt, PortalErrorType, PortalResult};

impl Crud for PaymentSourceReference {
  type InsertForm = PaymentSourceReferenceInsertForm;
  type UpdateForm = PaymentSourceReferenceUpdateForm;
  type IdType = PaymentSourceReferenceId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::insert_into(payment_source_reference::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::CouldntCreatePaymentSourceReference)
  }

  async fn read(pool: &mut DbPool<'_>, id: Self::IdType) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    payment_source_reference::table
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
    diesel::update(payment_source_reference::table.find(id))
      .set(form)
      .get_result::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::CouldntUpdatePaymentSourceReference)
  }
}

impl PaymentSourceReference {
  pub async fn read_by_source_id(
    pool: &mut DbPool<'_>,
    source_id: &str,
  ) -> PortalResult<Option<Self>> {
    let conn = &mut get_conn(pool).await?;
    payment_source_reference::table
      .filter(payment_source_reference::source_id.eq(source_id))
      .first::<Self>(conn)
      .await
      .optional()
      .with_portal_type(PortalErrorType::DatabaseError)
  }

  pub async fn set_status_by_source_id(
    pool: &mut DbPool<'_>,
    source_id: &str,
    status: SourceStatus,
  ) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    let form = PaymentSourceReferenceUpdateForm {
      status: Some(status),
      updated_at: Some(Utc::now()),
    };
    diesel::update(
      payment_source_reference::table.filter(payment_source_reference::source_id.eq(source_id)),
    )
    .set(&form)
    .get_result::<Self>(conn)
    .await
    .with_portal_type(PortalErrorType::CouldntUpdatePaymentSourceReference)
  }
}
