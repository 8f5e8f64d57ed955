use crate::{
    error::ForecastError,
    models::{round_to, wei_to_gwei, FeatureVector, FEATURE_COUNT, PREDICTION_DECIMALS},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A transform fitted at training time and replayed unchanged at inference.
pub trait FeatureScaler: Send + Sync {
    fn n_features(&self) -> usize;
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ForecastError>;
}

/// A fitted model mapping one scaled row to a scalar in wei.
pub trait Regressor: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, features: &[f64]) -> Result<f64, ForecastError>;
}

/// Per-feature standardisation: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ForecastError> {
        check_shape("scaler", self.n_features(), features.len())?;

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                // Constant columns are stored with a zero scale
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }
}

/// Linear model: `intercept + coef · x`. Ridge regression predicts this way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegressor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub coef: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, ForecastError> {
        check_shape("regressor", self.n_features(), features.len())?;

        Ok(self.intercept + self.coef.iter().zip(features).map(|(c, x)| c * x).sum::<f64>())
    }
}

fn check_shape(component: &'static str, expected: usize, actual: usize) -> Result<(), ForecastError> {
    if expected != actual {
        return Err(ForecastError::ShapeMismatch {
            component,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Scales a feature vector and evaluates the regressor on it.
///
/// Holds the process-wide fitted artifacts. They are read-only, so the engine
/// is shared across requests without locking.
#[derive(Clone)]
pub struct InferenceEngine {
    scaler: Arc<dyn FeatureScaler>,
    regressor: Arc<dyn Regressor>,
}

impl InferenceEngine {
    /// Fails when either artifact disagrees with the 13-column input.
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        regressor: Arc<dyn Regressor>,
    ) -> Result<Self, ForecastError> {
        check_shape("scaler", scaler.n_features(), FEATURE_COUNT)?;
        check_shape("regressor", regressor.n_features(), FEATURE_COUNT)?;

        Ok(Self { scaler, regressor })
    }

    pub fn feature_count(&self) -> usize {
        self.regressor.n_features()
    }

    /// Predicted gas price in wei.
    pub fn predict(&self, features: &FeatureVector) -> Result<f64, ForecastError> {
        let scaled = self.scaler.transform(&features.to_array())?;
        check_shape("regressor", self.regressor.n_features(), scaled.len())?;

        let prediction = self.regressor.predict(&scaled)?;
        if !prediction.is_finite() {
            return Err(ForecastError::Validation(format!(
                "model produced a non-finite prediction: {}",
                prediction
            )));
        }

        tracing::debug!("Model output: {:.0} wei", prediction);
        Ok(prediction)
    }

    /// Predicted gas price in gwei, rounded for display.
    pub fn predict_gwei(&self, features: &FeatureVector) -> Result<f64, ForecastError> {
        let wei = self.predict(features)?;
        Ok(round_to(wei_to_gwei(wei), PREDICTION_DECIMALS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_scaler() -> StandardScaler {
        StandardScaler {
            feature_names: None,
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    fn lag_only_regressor() -> LinearRegressor {
        let mut coef = vec![0.0; FEATURE_COUNT];
        coef[0] = 1.05;
        LinearRegressor {
            feature_names: None,
            coef,
            intercept: 0.0,
        }
    }

    fn features(gas_wei: f64) -> FeatureVector {
        FeatureVector {
            gas_lag_1: gas_wei,
            gas_lag_5: gas_wei,
            gas_lag_15: gas_wei,
            gas_rolling_mean_5: gas_wei,
            gas_rolling_mean_15: gas_wei,
            tx_count: 150.0,
            total_gas_used: 12e6,
            avg_block_full_ratio: 0.8,
            year: 2025.0,
            month: 3.0,
            day: 14.0,
            hour: 15.0,
            minute: 9.0,
        }
    }

    #[test]
    fn scaler_centres_and_scales() {
        let scaler = StandardScaler {
            feature_names: None,
            mean: vec![10.0, 2.0, 5.0],
            scale: vec![2.0, 0.5, 0.0],
        };
        let scaled = scaler.transform(&[14.0, 3.0, 7.0]).unwrap();
        assert_eq!(scaled, vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn regressor_is_affine() {
        let regressor = LinearRegressor {
            feature_names: None,
            coef: vec![2.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(regressor.predict(&[3.0, 4.0]).unwrap(), 2.5);
    }

    #[test]
    fn engine_predicts_in_wei() {
        let engine = InferenceEngine::new(
            Arc::new(identity_scaler()),
            Arc::new(lag_only_regressor()),
        )
        .unwrap();

        let wei = engine.predict(&features(20e9)).unwrap();
        assert!((wei - 21e9).abs() < 1e-3);
        assert_eq!(engine.predict_gwei(&features(20e9)).unwrap(), 21.0);
        assert_eq!(engine.feature_count(), FEATURE_COUNT);
    }

    #[test]
    fn engine_is_deterministic() {
        let engine = InferenceEngine::new(
            Arc::new(identity_scaler()),
            Arc::new(lag_only_regressor()),
        )
        .unwrap();

        let first = engine.predict(&features(33.3e9)).unwrap();
        let second = engine.predict(&features(33.3e9)).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn engine_rejects_short_scaler() {
        let scaler = StandardScaler {
            feature_names: None,
            mean: vec![0.0; 12],
            scale: vec![1.0; 12],
        };

        let err = InferenceEngine::new(Arc::new(scaler), Arc::new(lag_only_regressor()))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ForecastError::ShapeMismatch { component: "scaler", expected: 12, actual: 13 }
        ));
    }

    #[test]
    fn engine_rejects_wide_regressor() {
        let regressor = LinearRegressor {
            feature_names: None,
            coef: vec![0.0; 14],
            intercept: 0.0,
        };

        let err = InferenceEngine::new(Arc::new(identity_scaler()), Arc::new(regressor))
            .err()
            .unwrap();
        assert!(matches!(err, ForecastError::ShapeMismatch { component: "regressor", .. }));
    }

    #[test]
    fn direct_transform_with_wrong_width_fails() {
        let err = identity_scaler().transform(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, ForecastError::ShapeMismatch { .. }));
    }

    #[test]
    fn non_finite_prediction_is_rejected() {
        let regressor = LinearRegressor {
            feature_names: None,
            coef: vec![f64::INFINITY; FEATURE_COUNT],
            intercept: f64::NEG_INFINITY,
        };
        let engine = InferenceEngine::new(Arc::new(identity_scaler()), Arc::new(regressor)).unwrap();

        let err = engine.predict(&features(20e9)).unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));
    }
}
