use serde::{Deserialize, Serialize};

/// Gas oracle reading: the currently proposed price and the block it was taken at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub proposed_fee_price_gwei: f64,
    pub last_block: u64,
}

/// Utilisation of a single block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStats {
    pub tx_count: u64,
    pub gas_used: u64,
    pub gas_limit: u64,
}

impl BlockStats {
    /// `gas_used / gas_limit`, or 0 when the limit is zero.
    pub fn fullness_ratio(&self) -> f64 {
        if self.gas_limit == 0 {
            return 0.0;
        }
        self.gas_used as f64 / self.gas_limit as f64
    }
}

impl Default for BlockStats {
    fn default() -> Self {
        Self {
            tx_count: 0,
            gas_used: 0,
            gas_limit: 1,
        }
    }
}
