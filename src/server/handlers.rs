use super::types::ErrorResponse;
use crate::{
    Error,
    model::ModelInfo,
    predictor::{PredictionOutput, PredictionRequest, Predictor},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub predictor: Predictor,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictionRequest>, JsonRejection>,
) -> ApiResult<PredictionOutput> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected prediction payload: {}", rejection.body_text());
        (
            rejection.status(),
            Json(ErrorResponse {
                error: rejection.body_text(),
            }),
        )
    })?;

    info!(
        "Received prediction request: price={} initialprice={} languages={} genre={} tags={}",
        request.price,
        request.initialprice,
        request.languages.len(),
        request.genre.len(),
        request.tags.len()
    );

    match state.predictor.predict(&request).await {
        Ok(output) => {
            info!("Predicted class {}", output.target);
            Ok(Json(output))
        }
        Err(e) => Err(error_response("Prediction failed", e)),
    }
}

pub async fn model_info(State(state): State<AppState>) -> ApiResult<ModelInfo> {
    state
        .predictor
        .info()
        .await
        .map(Json)
        .map_err(|e| error_response("Model unavailable", e))
}

fn error_response(context: &str, e: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = if e.is_client_error() {
        warn!("{}: {}", context, e);
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        error!("{}: {}", context, e);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorResponse {
            error: format!("{}: {}", context, e),
        }),
    )
}
