//! Loading `collectwise.toml` on the server.

use std::path::PathBuf;

use store::DashboardConfig;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "COLLECTWISE_CONFIG";

static CONFIG: OnceCell<DashboardConfig> = OnceCell::const_new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Path of the config file: `$COLLECTWISE_CONFIG`, else `./collectwise.toml`.
pub fn config_path() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DashboardConfig::filename()))
}

/// Read and parse the config file. A missing file yields the defaults.
pub async fn load_config(path: PathBuf) -> Result<DashboardConfig, ConfigError> {
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(DashboardConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    DashboardConfig::from_toml(&text).map_err(|source| ConfigError::Parse { path, source })
}

/// Process-wide config, loaded on first use.
pub async fn get_config() -> Result<&'static DashboardConfig, ConfigError> {
    CONFIG.get_or_try_init(|| load_config(config_path())).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("collectwise-does-not-exist.toml");
        let config = load_config(path).await.unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[tokio::test]
    async fn test_reads_file() {
        let path = std::env::temp_dir().join(format!("collectwise-{}.toml", std::process::id()));
        tokio::fs::write(&path, "[open_devices]\npage_size = 4\n").await.unwrap();

        let config = load_config(path.clone()).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();

        assert_eq!(config.open_devices.page_size, 4);
        assert_eq!(config.report.page_size, 10);
    }

    #[tokio::test]
    async fn test_parse_error_names_the_file() {
        let path = std::env::temp_dir().join(format!("collectwise-bad-{}.toml", std::process::id()));
        tokio::fs::write(&path, "[report\n").await.unwrap();

        let err = load_config(path.clone()).await.unwrap_err();
        tokio::fs::remove_file(&path).await.ok();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("collectwise-bad-"));
    }
}
