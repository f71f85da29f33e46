//! Application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    auth::{jwt::JwtManager, sessions::SessionService},
    config::Config,
    store::{PgStore, Store},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
        let jwt = JwtManager::new(&config.jwt_secret);
        let sessions = SessionService::new(store.clone(), jwt);

        Self {
            config,
            store,
            sessions,
        }
    }
}
