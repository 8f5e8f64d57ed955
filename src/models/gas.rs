use serde::{Deserialize, Serialize};

/// Wei per gwei. The model is trained on wei, the provider and callers speak gwei.
pub const WEI_PER_GWEI: f64 = 1e9;

/// Decimal digits kept on the predicted price.
pub const PREDICTION_DECIMALS: i32 = 4;

pub fn gwei_to_wei(gwei: f64) -> f64 {
    gwei * WEI_PER_GWEI
}

pub fn wei_to_gwei(wei: f64) -> f64 {
    wei / WEI_PER_GWEI
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Reply body of a successful `/predict` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub current_gas_gwei: f64,
    pub predicted_gas_gwei: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gwei_wei_round_trip_within_four_decimals() {
        for gwei in [0.0, 0.0123, 1.5, 20.0, 37.123456, 512.9999] {
            let back = wei_to_gwei(gwei_to_wei(gwei));
            assert!((round_to(back, 4) - round_to(gwei, 4)).abs() < 1e-9, "{gwei} -> {back}");
        }
    }

    #[test]
    fn rounds_to_four_decimals() {
        assert_eq!(round_to(wei_to_gwei(21_123_456_789.0), PREDICTION_DECIMALS), 21.1235);
        assert_eq!(round_to(wei_to_gwei(21e9), PREDICTION_DECIMALS), 21.0);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let result = PredictionResult {
            current_gas_gwei: 20.0,
            predicted_gas_gwei: 21.0,
        };
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json, serde_json::json!({"current_gas_gwei": 20.0, "predicted_gas_gwei": 21.0}));
    }
}
