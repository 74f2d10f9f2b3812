use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fitted model artifacts. Without it the service starts but cannot assess.
    pub artifacts_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            artifacts_path: std::env::var("PLACEMENT_ARTIFACTS_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: parse_upload_limit(std::env::var("MAX_UPLOAD_BYTES").ok())?,
        })
    }
}

/// A zero limit would reject every upload, so it is refused at startup.
fn parse_upload_limit(raw: Option<String>) -> Result<usize> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_MAX_UPLOAD_BYTES);
    };
    let limit = raw
        .trim()
        .parse::<usize>()
        .context("MAX_UPLOAD_BYTES must be a positive integer")?;
    ensure!(limit > 0, "MAX_UPLOAD_BYTES must be a positive integer");
    Ok(limit)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            artifacts_path: None,
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_limit_defaults_when_unset() {
        assert_eq!(parse_upload_limit(None).unwrap(), DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_upload_limit_parses_value() {
        assert_eq!(parse_upload_limit(Some("1024".into())).unwrap(), 1024);
    }

    #[test]
    fn test_upload_limit_rejects_zero_and_garbage() {
        assert!(parse_upload_limit(Some("0".into())).is_err());
        assert!(parse_upload_limit(Some("-5".into())).is_err());
        assert!(parse_upload_limit(Some("five".into())).is_err());
    }
}
