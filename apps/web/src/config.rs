use anyhow::{bail, Context, Result};

/// Minimum length of `SESSION_SECRET`, in bytes, required to build a signing key.
pub const MIN_SESSION_SECRET_LEN: usize = 64;

/// Bundled demo artifact, relative to the `apps/web` directory.
pub const DEFAULT_MODEL_PATH: &str = "model/sample_model.json";

/// Application configuration loaded from environment variables.
/// Every variable has a development default; a malformed value is a startup error.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub model_path: String,
    /// Cookie signing secret. `None` means a random key is generated per process.
    pub session_secret: Option<String>,
    pub admin_username: String,
    pub admin_password: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let session_secret = std::env::var("SESSION_SECRET").ok();
        if let Some(secret) = &session_secret {
            if secret.len() < MIN_SESSION_SECRET_LEN {
                bail!(
                    "SESSION_SECRET must be at least {MIN_SESSION_SECRET_LEN} bytes, got {}",
                    secret.len()
                );
            }
        }

        Ok(Config {
            database_url: env_or("DATABASE_URL", "sqlite://job_predictions.db"),
            model_path: env_or("MODEL_PATH", DEFAULT_MODEL_PATH),
            session_secret,
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password: env_or("ADMIN_PASSWORD", "admin123"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::TfidfLogisticModel;
    use std::path::Path;

    #[test]
    fn test_default_model_path_is_bundled_and_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_MODEL_PATH);
        assert!(path.is_file(), "{} is missing", path.display());
        TfidfLogisticModel::load(&path).unwrap();
    }
}
