use std::sync::Arc;

use amawal_config::Config;
use amawal_core::{AuthStatus, SearchSession};
use amawal_gateway::{DictionaryGateway, HttpGateway};
use tokio::sync::RwLock;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Auth state as last pushed by the auth service
    pub auth: AuthStatus,
    pub session: SearchSession,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let gateway = HttpGateway::new(&config.gateway)?;
        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    pub fn with_gateway(config: Config, gateway: Arc<dyn DictionaryGateway>) -> Self {
        let auth = AuthStatus::new(config.gateway.token.is_some());
        let session = SearchSession::new(gateway, Arc::new(auth.clone()), &config.search);

        Self {
            config: Arc::new(RwLock::new(config)),
            auth,
            session,
        }
    }
}
