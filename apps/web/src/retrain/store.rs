use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::retrain::RetrainLogRow;

/// Appends a retrain log row and returns it with its database-assigned timestamp.
pub async fn insert_retrain_log(
    pool: &SqlitePool,
    accuracy: f64,
    training_source: &str,
) -> Result<RetrainLogRow> {
    Ok(sqlx::query_as::<_, RetrainLogRow>(
        r#"
        INSERT INTO retrain_logs (accuracy, training_source)
        VALUES (?, ?)
        RETURNING id, accuracy, timestamp, training_source
        "#,
    )
    .bind(accuracy)
    .bind(training_source)
    .fetch_one(pool)
    .await?)
}

/// All retrain log rows, newest first. Same-second rows fall back to insertion order.
pub async fn list_retrain_logs(pool: &SqlitePool) -> Result<Vec<RetrainLogRow>> {
    Ok(sqlx::query_as::<_, RetrainLogRow>(
        "SELECT id, accuracy, timestamp, training_source FROM retrain_logs ORDER BY timestamp DESC, id DESC",
    )
    .fetch_all(pool)
    .await?)
}

pub async fn latest_retrain(pool: &SqlitePool) -> Result<Option<RetrainLogRow>> {
    Ok(sqlx::query_as::<_, RetrainLogRow>(
        "SELECT id, accuracy, timestamp, training_source FROM retrain_logs ORDER BY timestamp DESC, id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await?)
}
