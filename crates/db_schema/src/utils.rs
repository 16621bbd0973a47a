use diesel_async::{
  pooled_connection::{
    deadpool::{Object as PooledConnection, Pool},
    AsyncDieselConnectionManager,
  },
  AsyncPgConnection,
};
use lexportal_utils::{
  error::{PortalErrorExt, PortalErrorType, PortalResult},
  settings::{structs::Settings, SETTINGS},
};
use std::ops::{Deref, DerefMut};

pub type ActualDbPool = Pool<AsyncPgConnection>;

/// References a pool or connection, and can be used interchangeably with
/// either in queries.
pub enum DbPool<'a> {
  Pool(&'a ActualDbPool),
  Conn(&'a mut AsyncPgConnection),
}

pub enum DbConn<'a> {
  Pool(PooledConnection<AsyncPgConnection>),
  Conn(&'a mut AsyncPgConnection),
}

pub async fn get_conn<'pool, 'conn>(
  pool: &'pool mut DbPool<'conn>,
) -> PortalResult<DbConn<'pool>> {
  Ok(match pool {
    DbPool::Pool(pool) => DbConn::Pool(
      pool
        .get()
        .await
        .with_portal_type(PortalErrorType::CouldntConnectDatabase)?,
    ),
    DbPool::Conn(conn) => DbConn::Conn(conn),
  })
}

impl Deref for DbConn<'_> {
  type Target = AsyncPgConnection;

  fn deref(&self) -> &Self::Target {
    match self {
      DbConn::Pool(conn) => conn.deref(),
      DbConn::Conn(conn) => conn,
    }
  }
}

impl DerefMut for DbConn<'_> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    match self {
      DbConn::Pool(conn) => conn.deref_mut(),
      DbConn::Conn(conn) => conn,
    }
  }
}

impl<'a> From<&'a ActualDbPool> for DbPool<'a> {
  fn from(value: &'a ActualDbPool) -> Self {
    DbPool::Pool(value)
  }
}

impl<'a> From<&'a mut AsyncPgConnection> for DbPool<'a> {
  fn from(value: &'a mut AsyncPgConnection) -> Self {
    DbPool::Conn(value)
  }
}

impl<'a, 'b: 'a> From<&'a mut DbConn<'b>> for DbPool<'a> {
  fn from(value: &'a mut DbConn<'b>) -> Self {
    DbPool::Conn(value.deref_mut())
  }
}

pub fn build_db_pool(settings: &Settings) -> PortalResult<ActualDbPool> {
  let manager =
    AsyncDieselConnectionManager::<AsyncPgConnection>::new(&settings.database.connection);
  let pool = Pool::builder(manager)
    .max_size(settings.database.pool_size)
    .build()
    .with_portal_type(PortalErrorType::CouldntConnectDatabase)?;
  Ok(pool)
}

#[allow(clippy::expect_used)]
pub fn build_db_pool_for_tests() -> ActualDbPool {
  build_db_pool(&SETTINGS).expect("db pool missing")
}
