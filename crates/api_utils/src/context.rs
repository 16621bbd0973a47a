use crate::subscription::SubscriptionHub;
use lexportal_db_schema::{
  source::secret::Secret,
  utils::{ActualDbPool, DbPool},
};
use lexportal_payment::PaymongoClient;
use lexportal_utils::settings::{structs::Settings, SETTINGS};
use reqwest_middleware::ClientWithMiddleware;
use std::sync::Arc;

#[derive(Clone)]
pub struct PortalContext {
  // Wrap pool in Arc to avoid expensive clones
  pool: Arc<ActualDbPool>,
  client: Arc<ClientWithMiddleware>,
  paymongo: Arc<PaymongoClient>,
  secret: Arc<Secret>,
  subscriptions: Arc<SubscriptionHub>,
}

impl PortalContext {
  pub fn create(
    pool: ActualDbPool,
    client: ClientWithMiddleware,
    paymongo: PaymongoClient,
    secret: Secret,
  ) -> PortalContext {
    PortalContext {
      pool: Arc::new(pool),
      client: Arc::new(client),
      paymongo: Arc::new(paymongo),
      secret: Arc::new(secret),
      subscriptions: Arc::new(SubscriptionHub::default()),
    }
  }

  pub fn pool(&self) -> DbPool<'_> {
    DbPool::Pool(&self.pool)
  }

  pub fn client(&self) -> &ClientWithMiddleware {
    &self.client
  }

  pub fn paymongo(&self) -> &PaymongoClient {
    &self.paymongo
  }

  pub fn settings(&self) -> &'static Settings {
    &SETTINGS
  }

  pub fn secret(&self) -> &Secret {
    &self.secret
  }

  pub fn subscriptions(&self) -> &SubscriptionHub {
    &self.subscriptions
  }
}
