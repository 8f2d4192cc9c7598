use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RetrainLogRow {
    pub id: i64,
    pub accuracy: f64,
    pub timestamp: NaiveDateTime,
    /// Uploaded dataset filename, or "default dataset".
    pub training_source: String,
}
