pub mod artifacts;
pub mod features;
pub mod forecaster;
pub mod inference;
pub mod telemetry;

pub use forecaster::GasForecaster;
pub use inference::{FeatureScaler, InferenceEngine, LinearRegressor, Regressor, StandardScaler};
pub use telemetry::{EtherscanClient, TelemetrySource};
