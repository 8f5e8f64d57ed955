use crate::{
    error::ForecastError,
    models::{BlockStats, TelemetrySnapshot},
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Live chain state needed to build one prediction.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Current proposed gas price and the latest block number.
    async fn fetch_current_state(&self) -> Result<TelemetrySnapshot, ForecastError>;

    /// Utilisation of the given block.
    async fn fetch_block_stats(&self, block_number: u64) -> Result<BlockStats, ForecastError>;
}

/// Etherscan v2 API client. One attempt per call, nothing cached.
#[derive(Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    chain_id: u64,
}

#[derive(Debug, Deserialize)]
struct EtherscanEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Value,
}

impl EtherscanClient {
    pub fn new(api_url: &str, api_key: &str, chain_id: u64, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Etherscan HTTP client")?;

        Ok(Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            chain_id,
        })
    }

    async fn query(&self, module: &str, action: &str, extra: &[(&str, String)]) -> Result<Value, ForecastError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("chainid", self.chain_id.to_string()),
                ("module", module.to_string()),
                ("action", action.to_string()),
            ])
            .query(extra)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ForecastError::Upstream(format!(
                "Etherscan {} returned HTTP {}",
                action,
                response.status()
            )));
        }

        let envelope = response.json::<EtherscanEnvelope>().await?;

        if envelope.status.as_deref() == Some("0") {
            return Err(ForecastError::Upstream(format!(
                "Etherscan {} failed: {}",
                action,
                envelope.message.as_deref().unwrap_or("NOTOK")
            )));
        }

        if !envelope.result.is_object() {
            return Err(ForecastError::Upstream(format!(
                "Etherscan {} returned no result object",
                action
            )));
        }

        Ok(envelope.result)
    }
}

#[async_trait]
impl TelemetrySource for EtherscanClient {
    async fn fetch_current_state(&self) -> Result<TelemetrySnapshot, ForecastError> {
        let result = self.query("gastracker", "gasoracle", &[]).await?;
        let snapshot = parse_gas_oracle(&result)?;

        tracing::debug!(
            "Gas oracle: propose={} gwei, last_block={}",
            snapshot.proposed_fee_price_gwei,
            snapshot.last_block
        );

        Ok(snapshot)
    }

    async fn fetch_block_stats(&self, block_number: u64) -> Result<BlockStats, ForecastError> {
        let result = self
            .query("block", "getblockreward", &[("blockno", block_number.to_string())])
            .await?;
        let stats = parse_block_stats(&result)?;

        tracing::debug!(
            "Block {}: tx_count={}, gas_used={}, gas_limit={}",
            block_number,
            stats.tx_count,
            stats.gas_used,
            stats.gas_limit
        );

        Ok(stats)
    }
}

pub(crate) fn parse_gas_oracle(result: &Value) -> Result<TelemetrySnapshot, ForecastError> {
    let price = present(result, "ProposeGasPrice").ok_or_else(|| {
        ForecastError::Upstream("gas oracle response missing ProposeGasPrice".to_string())
    })?;
    let block = present(result, "LastBlock").ok_or_else(|| {
        ForecastError::Upstream("gas oracle response missing LastBlock".to_string())
    })?;

    Ok(TelemetrySnapshot {
        proposed_fee_price_gwei: parse_decimal(price, "ProposeGasPrice")?,
        last_block: parse_integer(block, "LastBlock")?,
    })
}

pub(crate) fn parse_block_stats(result: &Value) -> Result<BlockStats, ForecastError> {
    let defaults = BlockStats::default();

    let integer_or = |name: &str, default: u64| match present(result, name) {
        Some(value) => parse_integer(value, name),
        None => Ok(default),
    };

    Ok(BlockStats {
        tx_count: integer_or("txCount", defaults.tx_count)?,
        gas_used: integer_or("gasUsed", defaults.gas_used)?,
        gas_limit: integer_or("gasLimit", defaults.gas_limit)?,
    })
}

/// Field value, treating null and blank strings as absent.
fn present<'a>(result: &'a Value, name: &str) -> Option<&'a Value> {
    match result.get(name)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(value),
    }
}

fn parse_decimal(value: &Value, name: &str) -> Result<f64, ForecastError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ForecastError::Validation(format!("{} is not a valid decimal: {}", name, value)))
}

fn parse_integer(value: &Value, name: &str) -> Result<u64, ForecastError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                Some(hex) => u64::from_str_radix(hex, 16).ok(),
                None => s.parse::<u64>().ok(),
            }
        }
        _ => None,
    };

    parsed.ok_or_else(|| {
        ForecastError::Validation(format!("{} is not a valid non-negative integer: {}", name, value))
    })
}
