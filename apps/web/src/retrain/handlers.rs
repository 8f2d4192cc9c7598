use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::auth::AdminSession;
use crate::errors::AppError;
use crate::render;
use crate::retrain::store::{insert_retrain_log, list_retrain_logs};
use crate::retrain::{simulated_accuracy, training_source};
use crate::state::AppState;

/// Multipart field that may carry an uploaded training dataset.
const DATASET_FIELD: &str = "dataset";

#[derive(Debug, Serialize)]
pub struct RetrainResponse {
    pub success: bool,
    pub accuracy: f64,
    pub timestamp: String,
    pub training_source: String,
    pub simulated: bool,
}

/// Failures of the JSON retrain endpoint, reported as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum RetrainError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("invalid upload: {0}")]
    Upload(#[from] MultipartError),

    #[error("{0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for RetrainError {
    fn into_response(self) -> Response {
        let status = match &self {
            RetrainError::Unauthorized => StatusCode::FORBIDDEN,
            RetrainError::Upload(_) | RetrainError::Storage(_) => {
                error!("Retrain failed: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// POST /retrain
///
/// Records a simulated retraining run. The optional multipart field `dataset`
/// names the training source; its contents are not read.
pub async fn handle_retrain(
    session: Option<AdminSession>,
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> Result<Json<RetrainResponse>, RetrainError> {
    if session.is_none() {
        return Err(RetrainError::Unauthorized);
    }

    let file_name = match multipart {
        Some(multipart) => dataset_file_name(multipart).await?,
        None => None,
    };
    let source = training_source(file_name.as_deref());
    let accuracy = simulated_accuracy(&mut rand::thread_rng());

    let row = insert_retrain_log(&state.db, accuracy, &source).await?;
    warn!("Retrain is simulated: model unchanged, logged fabricated accuracy {accuracy:.2}");
    info!("Retrain log {} recorded (source: {source})", row.id);

    Ok(Json(RetrainResponse {
        success: true,
        accuracy: row.accuracy,
        timestamp: row.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        training_source: row.training_source,
        simulated: true,
    }))
}

async fn dataset_file_name(mut multipart: Multipart) -> Result<Option<String>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(DATASET_FIELD) {
            return Ok(field.file_name().map(str::to_string));
        }
    }
    Ok(None)
}

/// GET /retrain_logs
pub async fn handle_retrain_logs(
    _session: AdminSession,
    State(state): State<AppState>,
) -> Result<Html<String>, AppError> {
    let logs = list_retrain_logs(&state.db).await?;
    Ok(Html(render::retrain_logs_page(&logs)))
}
