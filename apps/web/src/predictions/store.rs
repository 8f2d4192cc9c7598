use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::inference::{Label, Verdict};
use crate::models::prediction::{LabelCounts, PredictionRow};

/// Appends one prediction. Rows are never updated or deleted afterwards.
pub async fn insert_prediction(pool: &SqlitePool, description: &str, verdict: &Verdict) -> Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO predictions (job_description, prediction, confidence) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(description)
    .bind(verdict.label.as_str())
    .bind(verdict.confidence)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored prediction {id}: {} ({:.2}%)",
        verdict.label, verdict.confidence
    );
    Ok(id)
}

/// Counts stored predictions per label.
pub async fn label_counts(pool: &SqlitePool) -> Result<LabelCounts> {
    let fake = count_label(pool, Label::Fake).await?;
    let real = count_label(pool, Label::Real).await?;
    Ok(LabelCounts { fake, real })
}

async fn count_label(pool: &SqlitePool, label: Label) -> Result<i64> {
    Ok(
        sqlx::query_scalar("SELECT COUNT(*) FROM predictions WHERE prediction = ?")
            .bind(label.as_str())
            .fetch_one(pool)
            .await?,
    )
}

/// Returns every prediction, newest insertion first.
pub async fn list_predictions(pool: &SqlitePool) -> Result<Vec<PredictionRow>> {
    Ok(sqlx::query_as::<_, PredictionRow>(
        "SELECT id, job_description, prediction, confidence, timestamp FROM predictions ORDER BY id DESC",
    )
    .fetch_all(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn verdict(label: Label, confidence: f64) -> Verdict {
        Verdict { label, confidence }
    }

    #[tokio::test]
    async fn test_insert_then_count() {
        let pool = test_pool().await;
        insert_prediction(&pool, "first", &verdict(Label::Fake, 91.2)).await.unwrap();
        insert_prediction(&pool, "second", &verdict(Label::Real, 60.0)).await.unwrap();
        insert_prediction(&pool, "third", &verdict(Label::Fake, 55.5)).await.unwrap();

        let counts = label_counts(&pool).await.unwrap();
        assert_eq!(counts, LabelCounts { fake: 2, real: 1 });
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let pool = test_pool().await;
        for (i, text) in ["a", "b", "c"].iter().enumerate() {
            let id = insert_prediction(&pool, text, &verdict(Label::Real, i as f64))
                .await
                .unwrap();
            assert_eq!(id, i as i64 + 1);
        }

        let rows = list_predictions(&pool).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(rows[0].job_description, "c");
        assert_eq!(rows[0].prediction, "Real Job");
    }

    #[tokio::test]
    async fn test_empty_counts() {
        let pool = test_pool().await;
        assert_eq!(label_counts(&pool).await.unwrap(), LabelCounts::default());
        assert!(list_predictions(&pool).await.unwrap().is_empty());
    }
}
