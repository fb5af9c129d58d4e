pub mod db;
pub mod extractors;
pub mod handlers;
pub mod names;
pub mod rejections;
pub mod scoring;
pub mod utils;

use std::path::PathBuf;

use axum::Router;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Db,
    pub uploads_dir: PathBuf,
    pub secure_cookies: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::auth::routes())
        .merge(handlers::quiz::routes())
        .merge(handlers::admin::routes())
        .merge(handlers::profile::routes())
        .with_state(state)
}
