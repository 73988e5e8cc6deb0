use crate::error::{Result, TouristAdminError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tourist_admin_common::config::{ClientConfig, DEFAULT_TIMEOUT_SECS};

/// 接続先の上書き用環境変数
pub const BASE_URL_ENV: &str = "TOURIST_ADMIN_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// 0 で無期限
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 設定ディレクトリ: ~/.config/tourist-admin
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TouristAdminError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("tourist-admin"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 環境変数を優先したベースURL
    pub fn effective_base_url(&self) -> String {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.base_url.clone(),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.effective_base_url()).with_timeout_secs(self.timeout_seconds)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(TouristAdminError::Config(format!(
                "base URL must start with http:// or https://: {}",
                url
            )));
        }
        self.base_url = url;
        Ok(())
    }
}
