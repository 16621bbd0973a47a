use crate::utils::DbPool;
use lexportal_utils::error::PortalResult;

pub trait Crud {
  type InsertForm;
  type UpdateForm;
  type IdType;

  fn create(
    pool: &mut DbPool<'_>,
    form: &Self::InsertForm,
  ) -> impl std::future::Future<Output = PortalResult<Self>> + Send
  where
    Self: Sized;

  fn read(
    pool: &mut DbPool<'_>,
    id: Self::IdType,
  ) -> impl std::future::Future<Output = PortalResult<Self>> + Send
  where
    Self: Sized;

  fn update(
    pool: &mut DbPool<'_>,
    id: Self::IdType,
    form: &Self::UpdateForm,
  ) -> impl std::future::Future<Output = PortalResult<Self>> + Send
  where
    Self: Sized;
}
