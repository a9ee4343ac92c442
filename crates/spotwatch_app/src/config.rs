//! Optional RON config file layered under the command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spotwatch_client::ClientSettings;
use spotwatch_logging::{sw_info, sw_warn};
use url::Url;

pub const DEFAULT_CONFIG_FILENAME: &str = "spotwatch.ron";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_LOG_FILENAME: &str = "spotwatch.log";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub reconnect_delay_ms: Option<u64>,
    pub navigation_delay_ms: Option<u64>,
    pub notification_ttl_ms: Option<u64>,
    pub max_upload_bytes: Option<u64>,
    pub allowed_types: Option<Vec<String>>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILENAME))
    }
}

/// A parsed config together with the file it came from, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedConfig {
    pub file: FileConfig,
    pub source: Option<PathBuf>,
}

impl LoadedConfig {
    /// Called once logging is up, since loading happens before it.
    pub fn log_source(&self) {
        match &self.source {
            Some(path) => sw_info!("Loaded config from {:?}", path),
            None => sw_info!("No config file; using defaults"),
        }
    }
}

/// An explicit path must exist; the default path is optional.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILENAME);
            if !path.exists() {
                return Ok(LoadedConfig::default());
            }
            path
        }
    };
    Ok(LoadedConfig {
        file: parse_file(path)?,
        source: Some(path.to_path_buf()),
    })
}

fn parse_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: FileConfig = ron::from_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

/// Defaults, then the file, then `--server`.
pub fn build_settings(file: &FileConfig, server_flag: Option<&str>) -> Result<ClientSettings> {
    let raw_server = server_flag
        .or(file.server_url.as_deref())
        .unwrap_or(DEFAULT_SERVER_URL);
    let server_url =
        Url::parse(raw_server).with_context(|| format!("Invalid server URL {raw_server:?}"))?;

    let mut settings = ClientSettings::default_with_server(server_url);
    let millis = Duration::from_millis;
    if let Some(ms) = file.connect_timeout_ms {
        settings.connect_timeout = millis(ms);
    }
    if let Some(ms) = file.request_timeout_ms {
        settings.request_timeout = millis(ms);
    }
    if let Some(ms) = file.reconnect_delay_ms {
        settings.reconnect_delay = millis(ms);
    }
    if let Some(ms) = file.navigation_delay_ms {
        settings.navigation_delay = millis(ms);
    }
    if let Some(ms) = file.notification_ttl_ms {
        settings.notification_ttl = millis(ms);
    }
    if let Some(max) = file.max_upload_bytes {
        settings.upload.max_bytes = max;
    }
    if let Some(types) = &file.allowed_types {
        if types.is_empty() {
            sw_warn!("Config lists no allowed upload types; keeping the defaults");
        } else {
            settings.upload.allowed_types = types.clone();
        }
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use spotwatch_core::MAX_UPLOAD_BYTES;

    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = build_settings(&FileConfig::default(), None).unwrap();
        assert_eq!(settings.server_url.as_str(), DEFAULT_SERVER_URL);
        assert_eq!(settings.navigation_delay, Duration::from_millis(2000));
        assert_eq!(settings.notification_ttl, Duration::from_millis(5000));
        assert_eq!(settings.upload.max_bytes, MAX_UPLOAD_BYTES);
    }

    #[test]
    fn file_values_override_defaults_and_flag_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                server_url: Some("http://lab.example:8080/"),
                reconnect_delay_ms: Some(250),
                max_upload_bytes: Some(1024),
                allowed_types: Some(["image/png"]),
            )"#
        )
        .unwrap();

        let loaded = load(Some(file.path())).unwrap();
        assert_eq!(loaded.source.as_deref(), Some(file.path()));
        let config = loaded.file;
        let settings = build_settings(&config, None).unwrap();
        assert_eq!(settings.server_url.as_str(), "http://lab.example:8080/");
        assert_eq!(settings.reconnect_delay, Duration::from_millis(250));
        assert_eq!(settings.upload.max_bytes, 1024);
        assert_eq!(settings.upload.allowed_types, vec!["image/png".to_string()]);
        assert_eq!(config.log_path(), PathBuf::from(DEFAULT_LOG_FILENAME));

        let settings = build_settings(&config, Some("https://other.example/")).unwrap();
        assert_eq!(settings.server_url.as_str(), "https://other.example/");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("absent.ron"))).is_err());
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        assert!(build_settings(&FileConfig::default(), Some("not a url")).is_err());
    }
}
