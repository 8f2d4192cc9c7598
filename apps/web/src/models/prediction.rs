use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PredictionRow {
    pub id: i64,
    pub job_description: String,
    /// "Fake Job" or "Real Job".
    pub prediction: String,
    pub confidence: f64,
    /// UTC, assigned by SQLite on insert.
    pub timestamp: NaiveDateTime,
}

/// Running totals per label, shown next to the prediction form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub fake: i64,
    pub real: i64,
}

impl LabelCounts {
    pub fn total(&self) -> i64 {
        self.fake + self.real
    }
}
