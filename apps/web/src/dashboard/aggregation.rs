use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::prediction::LabelCounts;
use crate::models::retrain::RetrainLogRow;
use crate::predictions::store::label_counts;
use crate::retrain::store::latest_retrain;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Predictions per calendar day, oldest first. `dates` and `counts` are parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<String>,
    pub counts: Vec<i64>,
}

/// Everything the dashboard page shows.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub counts: LabelCounts,
    pub series: DailySeries,
    pub last_retrain: Option<RetrainLogRow>,
}

/// Turns `(YYYY-MM-DD, count)` rows, already in chronological order, into a
/// chart series.
///
/// A single day is padded with the previous calendar day at zero so the chart
/// always has two points to draw a line between. No days means empty vectors.
pub fn daily_series(rows: Vec<(String, i64)>) -> Result<DailySeries> {
    if rows.len() != 1 {
        let (dates, counts) = rows.into_iter().unzip();
        return Ok(DailySeries { dates, counts });
    }

    let (day, count) = &rows[0];
    let date = NaiveDate::parse_from_str(day, DATE_FORMAT)
        .with_context(|| format!("unexpected date '{day}' in daily counts"))?;
    let previous = (date - Duration::days(1)).format(DATE_FORMAT).to_string();
    Ok(DailySeries {
        dates: vec![previous, day.clone()],
        counts: vec![0, *count],
    })
}

/// Prediction counts grouped by `DATE(timestamp)`, chronologically.
pub async fn daily_counts(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    Ok(sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT DATE(timestamp) AS day, COUNT(*) AS cnt
        FROM predictions
        GROUP BY DATE(timestamp)
        ORDER BY DATE(timestamp)
        "#,
    )
    .fetch_all(pool)
    .await?)
}

pub async fn build_dashboard(pool: &SqlitePool) -> Result<DashboardView> {
    let counts = label_counts(pool).await?;
    let series = daily_series(daily_counts(pool).await?)?;
    let last_retrain = latest_retrain(pool).await?;
    Ok(DashboardView {
        counts,
        series,
        last_retrain,
    })
}
