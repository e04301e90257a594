use std::sync::Arc;

use questlog_db::DbPool;

use crate::auth::jwt::JwtConfig;
use crate::config::ServerConfig;

/// Handler state, shared through `State<AppState>`. Clones are cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }

    pub fn jwt(&self) -> &JwtConfig {
        &self.config.jwt
    }
}
