use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

/// Seconds between two coin snapshot fetches (30 minutes).
pub const REFRESH_INTERVAL_SECS: u64 = 30 * 60;

pub const ENV_API_URL: &str = "COIN_DASHBOARD_API_URL";
pub const ENV_STORAGE_URL: &str = "COIN_DASHBOARD_STORAGE_URL";
pub const ENV_UPLOAD_PRESET: &str = "COIN_DASHBOARD_UPLOAD_PRESET";
pub const ENV_UPLOAD_FOLDER: &str = "COIN_DASHBOARD_UPLOAD_FOLDER";

const DEFAULT_STORAGE_URL: &str = "https://api.cloudinary.com/v1_1/dzo8iyl74/auto/upload";
const DEFAULT_UPLOAD_PRESET: &str = "customer_profile";
const DEFAULT_UPLOAD_FOLDER: &str = "compressed_files";

/// Where and how archives are uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Raw-upload endpoint of the storage provider
    pub upload_url: String,

    /// Unsigned upload preset configured at the provider
    pub upload_preset: String,

    /// Destination folder at the provider
    pub folder: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_STORAGE_URL.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            folder: DEFAULT_UPLOAD_FOLDER.to_string(),
        }
    }
}

/// Dashboard configuration.
///
/// Values come from the process environment first, then from whatever was
/// present in the build environment (`option_env!`), then from defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Backend base URL, without trailing slash (e.g., "http://localhost:5000/api")
    pub api_base_url: String,

    pub storage: StorageSettings,

    /// Seconds between snapshot fetches; also the countdown length
    pub refresh_interval_secs: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            storage: StorageSettings::default(),
            refresh_interval_secs: REFRESH_INTERVAL_SECS,
            request_timeout_secs: 30,
        }
    }

    /// Build settings from environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (the environment in
    /// production, a map in tests), falling back to build-time values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_layers(lookup, baked_value)
    }

    /// Build settings from a runtime lookup layered over a build-time one.
    /// Empty values count as unset in either layer, so a blank runtime
    /// value falls through to the build-time value.
    pub fn from_layers<F, B>(runtime: F, baked: B) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
        B: Fn(&str) -> Option<String>,
    {
        let present = |v: &String| !v.trim().is_empty();
        let get = |key: &str| {
            runtime(key)
                .filter(present)
                .or_else(|| baked(key).filter(present))
        };

        let api_base_url = get(ENV_API_URL)
            .ok_or_else(|| CoreError::Config(format!("{ENV_API_URL} is not set")))?;
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(CoreError::Config(format!(
                "{ENV_API_URL} must be an http(s) URL, got '{api_base_url}'"
            )));
        }

        let mut settings = Self::new(api_base_url);
        if let Some(url) = get(ENV_STORAGE_URL) {
            settings.storage.upload_url = url;
        }
        if let Some(preset) = get(ENV_UPLOAD_PRESET) {
            settings.storage.upload_preset = preset;
        }
        if let Some(folder) = get(ENV_UPLOAD_FOLDER) {
            settings.storage.folder = folder;
        }
        Ok(settings)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Values present in the build environment.
fn baked_value(key: &str) -> Option<String> {
    let value = match key {
        ENV_API_URL => option_env!("COIN_DASHBOARD_API_URL"),
        ENV_STORAGE_URL => option_env!("COIN_DASHBOARD_STORAGE_URL"),
        ENV_UPLOAD_PRESET => option_env!("COIN_DASHBOARD_UPLOAD_PRESET"),
        ENV_UPLOAD_FOLDER => option_env!("COIN_DASHBOARD_UPLOAD_FOLDER"),
        _ => None,
    };
    value.map(str::to_string)
}
