//! Rango: directorio de categorías y páginas.
//!
//! Los visitantes navegan por categorías y sus páginas; los usuarios
//! registrados añaden categorías y páginas. La sesión (cookie firmada)
//! lleva el usuario autenticado y el contador de visitas.

use std::sync::Arc;

use axum::{extract::FromRef, Router};

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod templates;
pub mod utils;

pub use config::Config;
pub use db::DbPool;
pub use error::AppError;

/// Estado compartido por todos los handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

pub fn build_router(state: AppState) -> Router {
    routes::create_routes(state)
}
