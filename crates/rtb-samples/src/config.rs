use anyhow::{Context, Result, bail};
use rtb_client::{PUBSUB_V1, REALTIME_BIDDING_V1};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "rtb-samples.json";

/// Largest page requested by list samples unless overridden.
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 50;

pub const KEY_FILE_ENV: &str = "RTB_KEY_FILE";
pub const API_ENDPOINT_ENV: &str = "RTB_API_ENDPOINT";
pub const PUBSUB_ENDPOINT_ENV: &str = "PUBSUB_API_ENDPOINT";
pub const MAX_PAGE_SIZE_ENV: &str = "RTB_MAX_PAGE_SIZE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Token file; relative paths resolve against the config file's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_bidding_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubsub_endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub base_dir: PathBuf,
    pub config: Config,
}

/// Load `path`, or `rtb-samples.json` from the current directory when no path is given.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load_config(path: Option<&Path>) -> Result<Option<LoadedConfig>> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let (path, explicit) = match path {
        Some(p) => (resolve_against(&cwd, p), true),
        None => (cwd.join(DEFAULT_CONFIG_NAME), false),
    };

    if !path.exists() {
        if explicit {
            bail!("config file not found: {}", path.display());
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config JSON: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");

    let base_dir = path.parent().map(|p| p.to_path_buf()).unwrap_or(cwd);
    Ok(Some(LoadedConfig { base_dir, config }))
}

/// Effective settings after layering environment overrides on the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub key_file: Option<PathBuf>,
    pub realtime_bidding_endpoint: String,
    pub pubsub_endpoint: String,
    pub max_page_size: i64,
}

impl Settings {
    pub fn resolve(loaded: Option<LoadedConfig>) -> Result<Self> {
        Self::resolve_with(loaded, |key| std::env::var(key).ok())
    }

    pub fn resolve_with(
        loaded: Option<LoadedConfig>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let (base_dir, config) = match loaded {
            Some(l) => (Some(l.base_dir), l.config),
            None => (None, Config::default()),
        };

        let key_file = match env(KEY_FILE_ENV) {
            Some(p) => Some(PathBuf::from(p)),
            None => config.key_file.map(|p| match &base_dir {
                Some(dir) => resolve_against(dir, &p),
                None => p,
            }),
        };

        let max_page_size = match env(MAX_PAGE_SIZE_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .with_context(|| format!("{MAX_PAGE_SIZE_ENV} must be an integer, got '{raw}'"))?,
            None => config.max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE),
        };
        if max_page_size < 1 {
            bail!("maximum page size must be at least 1, got {max_page_size}");
        }

        Ok(Self {
            key_file,
            realtime_bidding_endpoint: env(API_ENDPOINT_ENV)
                .or(config.realtime_bidding_endpoint)
                .unwrap_or_else(|| REALTIME_BIDDING_V1.to_string()),
            pubsub_endpoint: env(PUBSUB_ENDPOINT_ENV)
                .or(config.pubsub_endpoint)
                .unwrap_or_else(|| PUBSUB_V1.to_string()),
            max_page_size,
        })
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn config_deserializes_camel_case() {
        let json = r#"{
  "keyFile": "token.json",
  "realtimeBiddingEndpoint": "http://localhost:9000/v1/",
  "pubsubEndpoint": "http://localhost:9001/v1/",
  "maxPageSize": 10
}"#;
        let c: Config = serde_json::from_str(json).unwrap();
        assert_eq!(c.key_file.as_deref(), Some(Path::new("token.json")));
        assert_eq!(
            c.realtime_bidding_endpoint.as_deref(),
            Some("http://localhost:9000/v1/")
        );
        assert_eq!(c.pubsub_endpoint.as_deref(), Some("http://localhost:9001/v1/"));
        assert_eq!(c.max_page_size, Some(10));
    }

    #[test]
    fn defaults_without_config_or_env() {
        let s = Settings::resolve_with(None, no_env).unwrap();
        assert_eq!(s.key_file, None);
        assert_eq!(s.realtime_bidding_endpoint, REALTIME_BIDDING_V1);
        assert_eq!(s.pubsub_endpoint, PUBSUB_V1);
        assert_eq!(s.max_page_size, DEFAULT_MAX_PAGE_SIZE);
    }

    #[test]
    fn relative_key_file_resolves_against_config_dir() {
        let loaded = LoadedConfig {
            base_dir: PathBuf::from("/etc/rtb"),
            config: Config {
                key_file: Some(PathBuf::from("token.txt")),
                max_page_size: Some(20),
                ..Config::default()
            },
        };
        let s = Settings::resolve_with(Some(loaded), no_env).unwrap();
        assert_eq!(s.key_file, Some(PathBuf::from("/etc/rtb/token.txt")));
        assert_eq!(s.max_page_size, 20);
    }

    #[test]
    fn env_overrides_config() {
        let loaded = LoadedConfig {
            base_dir: PathBuf::from("/etc/rtb"),
            config: Config {
                key_file: Some(PathBuf::from("token.txt")),
                realtime_bidding_endpoint: Some("http://config/v1/".to_string()),
                max_page_size: Some(20),
                ..Config::default()
            },
        };
        let vars = HashMap::from([
            (KEY_FILE_ENV, "/tmp/other.txt"),
            (API_ENDPOINT_ENV, "http://env/v1/"),
            (MAX_PAGE_SIZE_ENV, " 5 "),
            (PUBSUB_ENDPOINT_ENV, ""),
        ]);
        let s = Settings::resolve_with(Some(loaded), |k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(s.key_file, Some(PathBuf::from("/tmp/other.txt")));
        assert_eq!(s.realtime_bidding_endpoint, "http://env/v1/");
        assert_eq!(s.pubsub_endpoint, PUBSUB_V1);
        assert_eq!(s.max_page_size, 5);
    }

    #[test]
    fn rejects_bad_page_size() {
        let err = Settings::resolve_with(None, |k| {
            (k == MAX_PAGE_SIZE_ENV).then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains(MAX_PAGE_SIZE_ENV));

        let loaded = LoadedConfig {
            base_dir: PathBuf::from("."),
            config: Config {
                max_page_size: Some(0),
                ..Config::default()
            },
        };
        assert!(Settings::resolve_with(Some(loaded), no_env).is_err());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_config_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, r#"{"maxPageSize": 7}"#).unwrap();
        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded.base_dir, dir.path());
        assert_eq!(loaded.config.max_page_size, Some(7));
    }
}
