// src/state.rs

use crate::config::Config;
use crate::models::{group::GroupRegistry, question::Catalog};
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub groups: Arc<GroupRegistry>,
    /// None when DATABASE_URL is absent or the store is unreachable;
    /// attempts/answers are then not persisted and stats return an error.
    pub pool: Option<PgPool>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Arc<GroupRegistry> {
    fn from_ref(state: &AppState) -> Self {
        state.groups.clone()
    }
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
