use crate::{
    error::ForecastError,
    models::PredictionResult,
    services::{features, InferenceEngine, TelemetrySource},
};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Fetch, assemble, scale and infer. One linear pass per request.
#[derive(Clone)]
pub struct GasForecaster {
    telemetry: Arc<dyn TelemetrySource>,
    engine: InferenceEngine,
}

impl GasForecaster {
    pub fn new(telemetry: Arc<dyn TelemetrySource>, engine: InferenceEngine) -> Self {
        Self { telemetry, engine }
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Runs the pipeline with `now` as the wall-clock instant for the time columns.
    pub async fn forecast_at(&self, now: NaiveDateTime) -> Result<PredictionResult, ForecastError> {
        let snapshot = self.telemetry.fetch_current_state().await?;
        let stats = self.telemetry.fetch_block_stats(snapshot.last_block).await?;

        let features = features::assemble(&snapshot, &stats, now)?;
        let predicted_gas_gwei = self.engine.predict_gwei(&features)?;

        tracing::info!(
            "Gas prediction: current={:.4} gwei, predicted={:.4} gwei, block={}",
            snapshot.proposed_fee_price_gwei,
            predicted_gas_gwei,
            snapshot.last_block
        );

        Ok(PredictionResult {
            current_gas_gwei: snapshot.proposed_fee_price_gwei,
            predicted_gas_gwei,
        })
    }
}
