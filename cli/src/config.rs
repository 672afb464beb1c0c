use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http_client::Credential;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRIES: u32 = 2;

const REDACTED: &str = "********";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<u32>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(path).with_context(|| format!("Failed to read config {:?}", path))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        let bytes = serde_json::to_vec_pretty(self).context("Failed to serialize config")?;
        fs::write(path, bytes).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }

    /// Values set in `other` win over values set here.
    pub fn merged(&self, other: &Config) -> Config {
        Config {
            base_url: other.base_url.clone().or_else(|| self.base_url.clone()),
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            bearer_token: other
                .bearer_token
                .clone()
                .or_else(|| self.bearer_token.clone()),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            retries: other.retries.or(self.retries),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn retries(&self) -> u32 {
        self.retries.unwrap_or(DEFAULT_RETRIES)
    }

    /// Copy with secrets masked, for display.
    pub fn redacted(&self) -> Config {
        let mask = |v: &Option<String>| v.as_ref().map(|_| REDACTED.to_string());
        Config {
            api_key: mask(&self.api_key),
            bearer_token: mask(&self.bearer_token),
            ..self.clone()
        }
    }

    /// A bearer token takes precedence over an API key.
    pub fn credential(&self) -> Option<Credential> {
        if let Some(token) = &self.bearer_token {
            return Some(Credential::Bearer(token.clone()));
        }
        self.api_key.clone().map(Credential::ApiKey)
    }
}

pub fn default_config_path() -> PathBuf {
    let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("opcpub");
    dir.push("config.json");
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = Config::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.retries(), DEFAULT_RETRIES);
        assert!(cfg.credential().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let cfg = Config {
            base_url: Some("http://publisher:9080".to_string()),
            api_key: Some("k".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{not json").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_merged_prefers_overrides() {
        let file = Config {
            base_url: Some("http://file".to_string()),
            api_key: Some("file-key".to_string()),
            retries: Some(5),
            ..Default::default()
        };
        let flags = Config {
            base_url: Some("http://flag".to_string()),
            bearer_token: Some("jwt".to_string()),
            ..Default::default()
        };
        let cfg = file.merged(&flags);
        assert_eq!(cfg.base_url(), "http://flag");
        assert_eq!(cfg.retries(), 5);
        assert_eq!(cfg.api_key.as_deref(), Some("file-key"));
        assert!(matches!(cfg.credential(), Some(Credential::Bearer(t)) if t == "jwt"));
    }

    #[test]
    fn test_redacted_masks_secrets() {
        let cfg = Config {
            base_url: Some("http://publisher:9080".to_string()),
            api_key: Some("secret-key".to_string()),
            bearer_token: Some("secret-jwt".to_string()),
            retries: Some(3),
            ..Default::default()
        };
        let shown = cfg.redacted();
        assert_eq!(shown.api_key.as_deref(), Some(REDACTED));
        assert_eq!(shown.bearer_token.as_deref(), Some(REDACTED));
        assert_eq!(shown.base_url, cfg.base_url);
        assert_eq!(shown.retries, Some(3));

        let printed = serde_json::to_string(&shown).unwrap();
        assert!(!printed.contains("secret"));
        assert!(Config::default().redacted().api_key.is_none());
    }
}
