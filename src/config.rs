use std::env;
use std::path::PathBuf;

use reqwest::Url;

use crate::error::ClientError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub base_url: String,
    pub export_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(base_url: &str, export_dir: impl Into<PathBuf>) -> Result<Self, ClientError> {
        Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid API url {}: {}", base_url, e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            export_dir: export_dir.into(),
        })
    }

    /// Reads `REPORTS_API_URL` and `REPORTS_EXPORT_DIR`, falling back to defaults.
    pub fn new_from_env() -> Result<Self, ClientError> {
        let base_url = env::var("REPORTS_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let export_dir = env::var("REPORTS_EXPORT_DIR").unwrap_or_else(|_| ".".to_string());

        Self::new(&base_url, export_dir)
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
