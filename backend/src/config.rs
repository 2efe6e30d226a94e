use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::youtube::client::DEFAULT_BASE_URL;

pub const ENV_ADMIN_USERNAME: &str = "STUDYFLIX_ADMIN_USERNAME";
pub const ENV_ADMIN_PASSWORD: &str = "STUDYFLIX_ADMIN_PASSWORD";
pub const ENV_YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// `channels.json` + `channels.json.bak` in `storage_path`.
    File,
    /// SQLite database file at `storage_path`.
    Sqlite,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: String,

    pub admin_username: String,
    pub admin_password: String,

    pub storage: StorageKind,
    pub storage_path: PathBuf,

    pub youtube_api_key: Option<String>,
    pub youtube_api_base_url: String,
    pub lookup_timeout: Duration,
}

#[derive(Debug, Default, Deserialize)]
struct AppConfigFile {
    listen_addr: Option<String>,

    admin_username: Option<String>,
    admin_password: Option<String>,

    storage: Option<StorageKind>,
    storage_path: Option<String>,

    youtube_api_key: Option<String>,
    youtube_api_base_url: Option<String>,
    lookup_timeout_secs: Option<u64>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() { None } else { Some(s) }
    })
}

impl AppConfig {
    /// Reads the TOML file at `path` and applies environment overrides.
    /// A missing file is fine as long as the environment supplies the admin
    /// credentials.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = if path.exists() {
            let raw = fs::read_to_string(path).with_context(|| {
                format!(
                    "Failed to read config file: {}",
                    path.to_string_lossy().as_ref()
                )
            })?;
            toml::from_str(&raw).context("Failed to parse config file")?
        } else {
            AppConfigFile::default()
        };

        Self::from_parts(file, |key| std::env::var(key).ok())
    }

    fn from_parts(file: AppConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let admin_username = non_empty(env(ENV_ADMIN_USERNAME).or(file.admin_username))
            .ok_or_else(|| anyhow!("admin_username is not configured (or {ENV_ADMIN_USERNAME})"))?;
        let admin_password = env(ENV_ADMIN_PASSWORD)
            .or(file.admin_password)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| anyhow!("admin_password is not configured (or {ENV_ADMIN_PASSWORD})"))?;

        let storage = file.storage.unwrap_or(StorageKind::File);
        let storage_path = PathBuf::from(non_empty(file.storage_path).unwrap_or_else(|| {
            match storage {
                StorageKind::File => "data".to_string(),
                StorageKind::Sqlite => "data/studyflix.sqlite".to_string(),
            }
        }));

        let lookup_timeout_secs = file.lookup_timeout_secs.unwrap_or(10);
        if lookup_timeout_secs == 0 {
            return Err(anyhow!("lookup_timeout_secs must be greater than zero"));
        }

        Ok(Self {
            listen_addr: non_empty(file.listen_addr).unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            admin_username,
            admin_password,
            storage,
            storage_path,
            youtube_api_key: non_empty(env(ENV_YOUTUBE_API_KEY).or(file.youtube_api_key)),
            youtube_api_base_url: non_empty(file.youtube_api_base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
        })
    }
}
