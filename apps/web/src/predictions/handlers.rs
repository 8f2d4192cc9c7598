use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::debug;

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::inference::{classify, validate_description};
use crate::predictions::store::{insert_prediction, label_counts, list_predictions};
use crate::render;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub job_description: String,
}

/// GET /
pub async fn handle_home() -> Html<String> {
    Html(render::home_page())
}

/// POST /predict
///
/// Rejected input re-renders the form with an inline message and writes nothing.
pub async fn handle_predict(
    _session: AdminSession,
    State(state): State<AppState>,
    Form(form): Form<PredictForm>,
) -> Result<Html<String>, AppError> {
    let description = match validate_description(&form.job_description) {
        Ok(text) => text.to_string(),
        Err(reason) => {
            debug!("Rejected description: {reason}");
            let counts = label_counts(&state.db).await?;
            return Ok(Html(render::predict_form_page(
                Some(&reason.to_string()),
                &form.job_description,
                counts,
            )));
        }
    };

    let verdict = classify(state.classifier.clone(), description.clone()).await?;
    insert_prediction(&state.db, &description, &verdict).await?;

    let counts = label_counts(&state.db).await?;
    Ok(Html(render::result_page(&verdict, &description, counts)))
}

/// GET /history
pub async fn handle_history(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let records = list_predictions(&state.db).await?;
    Ok(Html(render::history_page(&records)))
}
