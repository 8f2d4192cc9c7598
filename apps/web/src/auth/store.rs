use anyhow::Result;
use sqlx::SqlitePool;

use crate::models::admin::Admin;

/// Exact, case-sensitive username and password match against the `admin` table.
pub async fn verify_credentials(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<Option<Admin>> {
    Ok(sqlx::query_as::<_, Admin>(
        "SELECT id, username FROM admin WHERE username = ? AND password = ?",
    )
    .bind(username)
    .bind(password)
    .fetch_optional(pool)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn test_seeded_credentials_match() {
        let pool = test_pool().await;
        let admin = verify_credentials(&pool, "admin", "admin123").await.unwrap();
        assert_eq!(admin.map(|a| a.username), Some("admin".to_string()));
    }

    #[tokio::test]
    async fn test_any_other_combination_fails() {
        let pool = test_pool().await;
        for (user, pass) in [
            ("admin", "wrong"),
            ("Admin", "admin123"),
            ("admin", "ADMIN123"),
            ("admin ", "admin123"),
            ("", ""),
            ("root", "admin123"),
        ] {
            assert!(
                verify_credentials(&pool, user, pass).await.unwrap().is_none(),
                "{user:?}/{pass:?} should not authenticate"
            );
        }
    }
}
