pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::dashboard::handlers as dashboard;
use crate::predictions::handlers as predictions;
use crate::retrain::handlers as retrain;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(predictions::handle_home))
        .route("/predict", post(predictions::handle_predict))
        .route("/history", get(predictions::handle_history))
        // Session
        .route(
            "/admin_login",
            get(auth::handle_login_form).post(auth::handle_login),
        )
        .route("/logout", get(auth::handle_logout))
        // Admin views
        .route("/admin_dashboard", get(dashboard::handle_dashboard))
        .route("/retrain_logs", get(retrain::handle_retrain_logs))
        .route("/retrain", post(retrain::handle_retrain))
        .with_state(state)
}
