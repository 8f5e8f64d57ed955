use serde::{Deserialize, Serialize};

/// Number of inputs the fitted scaler and regressor were trained on.
pub const FEATURE_COUNT: usize = 13;

/// Training-time column names, in the order the fitted artifacts expect them.
///
/// [`FeatureVector::to_array`] must emit values in exactly this order. A swap
/// here does not fail anywhere, it only produces a wrong prediction.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gas_t-1",
    "gas_t-5",
    "gas_t-15",
    "gas_rolling_5",
    "gas_rolling_15",
    "tx_count",
    "total_gas_used",
    "avg_block_full_ratio",
    "year",
    "month",
    "day",
    "hour",
    "minute",
];

/// Model input with every column named.
///
/// Fee fields are in wei. Time fields are local wall-clock components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub gas_lag_1: f64,
    pub gas_lag_5: f64,
    pub gas_lag_15: f64,
    pub gas_rolling_mean_5: f64,
    pub gas_rolling_mean_15: f64,
    pub tx_count: f64,
    pub total_gas_used: f64,
    pub avg_block_full_ratio: f64,
    pub year: f64,
    pub month: f64,
    pub day: f64,
    pub hour: f64,
    pub minute: f64,
}

impl FeatureVector {
    /// Flattens into the column order of [`FEATURE_NAMES`].
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.gas_lag_1,
            self.gas_lag_5,
            self.gas_lag_15,
            self.gas_rolling_mean_5,
            self.gas_rolling_mean_15,
            self.tx_count,
            self.total_gas_used,
            self.avg_block_full_ratio,
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
        ]
    }

    /// Pairs each value with its column name.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array()).collect()
    }
}
