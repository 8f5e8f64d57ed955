//! Loading of the fitted scaler and regressor.
//!
//! Both artifacts are JSON exports of the training run. When an export lists
//! its `feature_names`, they must match the live column order exactly, so a
//! reordered export is refused at startup instead of skewing every prediction.

use crate::{
    models::FEATURE_NAMES,
    services::inference::{InferenceEngine, LinearRegressor, StandardScaler},
};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn load_scaler<P: AsRef<Path>>(path: P) -> Result<StandardScaler> {
    let path = path.as_ref();
    let scaler: StandardScaler = read_json(path)?;

    check_feature_names(scaler.feature_names.as_deref(), path)?;
    if scaler.mean.len() != scaler.scale.len() {
        bail!(
            "Scaler {} has {} means but {} scales",
            path.display(),
            scaler.mean.len(),
            scaler.scale.len()
        );
    }
    check_finite(scaler.mean.iter().chain(&scaler.scale), path)?;

    info!(path = %path.display(), features = scaler.mean.len(), "Scaler loaded");
    Ok(scaler)
}

pub fn load_regressor<P: AsRef<Path>>(path: P) -> Result<LinearRegressor> {
    let path = path.as_ref();
    let regressor: LinearRegressor = read_json(path)?;

    check_feature_names(regressor.feature_names.as_deref(), path)?;
    check_finite(regressor.coef.iter().chain(std::iter::once(&regressor.intercept)), path)?;

    info!(path = %path.display(), features = regressor.coef.len(), "Regressor loaded");
    Ok(regressor)
}

/// Loads both artifacts and wires them into an engine.
pub fn load_engine<P: AsRef<Path>>(scaler_path: P, model_path: P) -> Result<InferenceEngine> {
    let scaler = load_scaler(scaler_path)?;
    let regressor = load_regressor(model_path)?;

    InferenceEngine::new(Arc::new(scaler), Arc::new(regressor))
        .context("Fitted artifacts do not match the feature schema")
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse artifact {}", path.display()))
}

fn check_feature_names(names: Option<&[String]>, path: &Path) -> Result<()> {
    let Some(names) = names else {
        tracing::warn!(path = %path.display(), "Artifact carries no feature names, order is unchecked");
        return Ok(());
    };

    if names.len() != FEATURE_NAMES.len() {
        bail!(
            "Artifact {} was fitted on {} features, expected {}",
            path.display(),
            names.len(),
            FEATURE_NAMES.len()
        );
    }

    for (position, (found, expected)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if found != expected {
            bail!(
                "Artifact {} column {} is '{}', expected '{}'",
                path.display(),
                position,
                found,
                expected
            );
        }
    }

    Ok(())
}

fn check_finite<'a>(mut values: impl Iterator<Item = &'a f64>, path: &Path) -> Result<()> {
    if values.any(|v| !v.is_finite()) {
        bail!("Artifact {} contains non-finite parameters", path.display());
    }
    Ok(())
}
