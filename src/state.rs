use std::sync::Arc;

use sqlx::PgPool;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub pool: PgPool,
}
