use axum::{extract::State, response::Html};

use crate::auth::AdminSession;
use crate::dashboard::aggregation::build_dashboard;
use crate::errors::AppError;
use crate::render;
use crate::state::AppState;

/// GET /admin_dashboard
pub async fn handle_dashboard(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let view = build_dashboard(&state.db).await?;
    Ok(Html(render::dashboard_page(&view)))
}
