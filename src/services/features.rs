use crate::{
    error::ForecastError,
    models::{gwei_to_wei, BlockStats, FeatureVector, TelemetrySnapshot},
};
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Builds the model input from one telemetry reading.
///
/// No fee history is kept, so every lag and rolling-mean column carries the
/// current price. `now` is local wall-clock time; it is not normalised to UTC.
pub fn assemble(
    snapshot: &TelemetrySnapshot,
    stats: &BlockStats,
    now: NaiveDateTime,
) -> Result<FeatureVector, ForecastError> {
    let price_gwei = snapshot.proposed_fee_price_gwei;
    if !price_gwei.is_finite() || price_gwei < 0.0 {
        return Err(ForecastError::Validation(format!(
            "proposed gas price must be a non-negative number, got {}",
            price_gwei
        )));
    }

    let gas_wei = gwei_to_wei(price_gwei);

    let features = FeatureVector {
        gas_lag_1: gas_wei,
        gas_lag_5: gas_wei,
        gas_lag_15: gas_wei,
        gas_rolling_mean_5: gas_wei,
        gas_rolling_mean_15: gas_wei,
        tx_count: stats.tx_count as f64,
        total_gas_used: stats.gas_used as f64,
        avg_block_full_ratio: stats.fullness_ratio(),
        year: now.year() as f64,
        month: now.month() as f64,
        day: now.day() as f64,
        hour: now.hour() as f64,
        minute: now.minute() as f64,
    };

    if let Some((name, value)) = features.named().into_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ForecastError::Validation(format!(
            "feature {} is not finite: {}",
            name, value
        )));
    }

    Ok(features)
}
