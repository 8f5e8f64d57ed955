use crate::{error::ForecastError, models::PredictionResult, services::GasForecaster};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use tracing::Instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub forecaster: GasForecaster,
}

pub async fn predict_gas(State(state): State<AppState>) -> Response {
    let request_id = Uuid::new_v4();
    let now = Local::now().naive_local();

    let outcome = state
        .forecaster
        .forecast_at(now)
        .instrument(tracing::info_span!("predict", %request_id))
        .await;

    match outcome {
        Ok(result) => build_success(result.current_gas_gwei, result.predicted_gas_gwei).into_response(),
        Err(err) => build_error(err),
    }
}

pub fn build_success(current_gas_gwei: f64, predicted_gas_gwei: f64) -> Json<PredictionResult> {
    Json(PredictionResult {
        current_gas_gwei,
        predicted_gas_gwei,
    })
}

/// Logs the failure and replies 500 with the error message only.
pub fn build_error(err: ForecastError) -> Response {
    err.into_response()
}
