pub mod gas;
pub mod health;

pub use gas::*;
pub use health::*;

use axum::{routing::get, Router};

/// Routes without the outer middleware stack.
pub fn router(app_state: AppState, health_state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(health_state)
        .route("/predict", get(predict_gas))
        .with_state(app_state)
}
