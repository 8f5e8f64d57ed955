use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Environment {
    Development,
    Testnet,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,

    // Etherscan (telemetry source)
    pub etherscan_api_url: String,
    pub etherscan_api_key: String,
    pub chain_id: u64,
    pub upstream_timeout_secs: u64,

    // Fitted artifacts
    pub scaler_path: PathBuf,
    pub model_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let environment = Self::parse_environment()?;

        let config = Self {
            environment,
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid PORT")?,

            etherscan_api_url: std::env::var("ETHERSCAN_API_URL")
                .unwrap_or_else(|_| "https://api.etherscan.io/v2/api".to_string()),
            etherscan_api_key: std::env::var("ETHERSCAN_API_KEY")
                .context("ETHERSCAN_API_KEY required")?,
            chain_id: std::env::var("CHAIN_ID")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .context("Invalid CHAIN_ID")?,
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECS")?,

            scaler_path: std::env::var("SCALER_PATH")
                .unwrap_or_else(|_| "models/scaler_ridge.json".to_string())
                .into(),
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/ridge_model.json".to_string())
                .into(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    fn parse_environment() -> Result<Environment> {
        let env = std::env::var("ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string());

        match env.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testnet" | "test" => Ok(Environment::Testnet),
            "production" | "prod" => Ok(Environment::Production),
            _ => bail!("Unknown environment: {}", env),
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.etherscan_api_url.starts_with("http") {
            bail!("ETHERSCAN_API_URL must be HTTP(S) URL");
        }

        if self.etherscan_api_key.trim().is_empty() {
            bail!("ETHERSCAN_API_KEY must not be empty");
        }

        if self.upstream_timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
        }

        tracing::info!(
            "Configuration validated for {:?} environment",
            self.environment
        );

        Ok(())
    }
}
