mod auth;
mod config;
mod db;
mod entities;
mod error;
mod forms;
mod models;
mod policy;
mod routes;
mod store;
mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::ShowStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: ShowStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,showboxd=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = ShowStore::new(db);

    let state = Arc::new(AppState { config: config.clone(), store });

    let app = Router::new()
        .route("/", get(routes::home))
        .route("/shows/", get(routes::shows))
        .route("/shows/add/", get(routes::show_add_form).post(routes::show_add_submit))
        .route("/shows/{id}/edit/", get(routes::show_edit_form).post(routes::show_edit_submit))
        .route("/shows/{id}/delete/", post(routes::show_delete))
        .route("/login/", get(routes::login_form).post(routes::login_submit))
        .route("/signup/", get(routes::signup_form).post(routes::signup_submit))
        .route("/logout/", get(routes::logout))
        .route("/profile/", get(routes::profile))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
