//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::config::pricing::PriceConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub pricing: PriceConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, pricing: PriceConfig) -> Self {
        Self {
            pool,
            config,
            pricing,
        }
    }
}
