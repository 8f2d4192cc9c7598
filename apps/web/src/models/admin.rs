use sqlx::FromRow;

/// Admin account as seen after a successful credential check. The password
/// column is never selected back out.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
}
