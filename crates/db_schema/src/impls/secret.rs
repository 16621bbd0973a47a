use crate::{
  source::secret::Secret,
  utils::{get_conn, DbPool},
};
use diesel_async::RunQueryDsl;
use lexportal_db_schema_file::schema::secret::dsl::secret;
use lexportal_utils::error::{PortalErrorExt, PortalErrorType, PortalResult};

impl Secret {
  /// Initialize the Secrets from the DB.
  /// Warning: You should only call this once.
  pub async fn init(pool: &mut DbPool<'_>) -> PortalResult<Secret> {
    let conn = &mut get_conn(pool).await?;
    secret
      .first::<Secret>(conn)
      .await
      .with_portal_type(PortalErrorType::DatabaseError)
  }
}
