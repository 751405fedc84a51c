pub mod handlers;
mod types;

pub use types::ErrorResponse;

use crate::{Result, config::Config, model::ModelStore, predictor::Predictor};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const API_PREFIX: &str = "/api/steam/v1";

pub fn router(predictor: Predictor) -> Router {
    let app_state = handlers::AppState { predictor };

    let api: Router<handlers::AppState> = Router::new()
        .route("/predict", post(handlers::predict))
        .route("/model", get(handlers::model_info));

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    // Load the model once; the store decides whether it is re-read later.
    let store = ModelStore::open(&config.model);
    let app = router(Predictor::new(store));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
