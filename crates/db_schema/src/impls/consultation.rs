use crate::{
  newtypes::{ConsultationId, LocalUserId},
  source::consultation::{
    Consultation, ConsultationDocument, ConsultationDocumentInsertForm, ConsultationInsertForm,
    ConsultationUpdateForm,
  },
  traits::Crud,
  utils::{get_conn, DbPool},
};
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use lexportal_db_schema_file::schema::{consultation, consultation_document};
use lexportal_utils::error::{PortalErrorExt, PortalErrorType, PortalResult};

impl Crud for Consultation {
  type InsertForm = ConsultationInsertForm;
  type UpdateForm = ConsultationUpdateForm;
  type IdType = ConsultationId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    diesel::insert_into(consultation::table)
      .values(form)
      .get_result::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::CouldntCreateConsultation)
  }

  async fn read(pool: &mut DbPool<'_>, id: Self::IdType) -> PortalResult<Self> {
    let conn = &mut get_conn(pool).await?;
    consultation::table
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
    diesel::update(consultation::table.find(id))
      .set(form)
      .get_result::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)
  }
}

impl Consultation {
  /// Consultations for one owner, newest first.
  pub async fn list_for_owner(
    pool: &mut DbPool<'_>,
    owner_id: LocalUserId,
  ) -> PortalResult<Vec<Self>> {
    let conn = &mut get_conn(pool).await?;
    consultation::table
      .filter(consultation::owner_id.eq(owner_id))
      .order_by(consultation::created_at.desc())
      .load::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)
  }
}

impl ConsultationDocument {
  pub async fn create_many(
    pool: &mut DbPool<'_>,
    forms: &[ConsultationDocumentInsertForm],
  ) -> PortalResult<Vec<Self>> {
    if forms.is_empty() {
      return Ok(vec![]);
    }
    let conn = &mut get_conn(pool).await?;
    diesel::insert_into(consultation_document::table)
      .values(forms)
      .get_results::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::CouldntCreateConsultation)
  }

  pub async fn for_consultation(
    pool: &mut DbPool<'_>,
    consultation_id: ConsultationId,
  ) -> PortalResult<Vec<Self>> {
    let conn = &mut get_conn(pool).await?;
    consultation_document::table
      .filter(consultation_document::consultation_id.eq(consultation_id))
      .order_by(consultation_document::id.asc())
      .load::<Self>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)
  }
}
