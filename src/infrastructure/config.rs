//! 配置基础设施
//!
//! 所有配置都来自环境变量，未设置时使用默认值。

use std::{
    collections::HashMap, env, fmt::Display, fs, net::SocketAddr, str::FromStr, time::Duration,
};

use thiserror::Error;
use tracing::{info, warn, Level};

/// 未配置任何密钥时的兼容值
const LEGACY_API_KEY: &str = "TopSecretAPIKey";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read secret file {path}: {source}")]
    SecretFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 删除接口密钥的来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeySource {
    Env,
    File(String),
    Legacy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub api_key: String,
    pub api_key_source: ApiKeySource,
    pub log_level: Level,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse(vars, "CAFE_API_REQUEST_TIMEOUT_SECS", "30")?;
        let (api_key, api_key_source) = api_key(vars)?;

        Ok(Self {
            addr: parse(vars, "CAFE_API_ADDR", "127.0.0.1:5000")?,
            database_url: vars
                .get("DATABASE_URL")
                .cloned()
                .unwrap_or_else(|| "sqlite://cafes.db".to_string()),
            api_key,
            api_key_source,
            log_level: parse(vars, "CAFE_API_LOG_LEVEL", "info")?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 配置在日志初始化之前加载，所以加载过程中的提示在这里补打
    pub fn log_summary(&self) {
        info!(
            "Config: addr={} database={} timeout={}s",
            self.addr,
            self.database_url,
            self.request_timeout.as_secs()
        );

        match &self.api_key_source {
            ApiKeySource::Env => info!("Loaded API key from CAFE_API_KEY"),
            ApiKeySource::File(path) => info!("Loaded API key from {}", path),
            ApiKeySource::Legacy => {
                warn!("CAFE_API_KEY not set, falling back to the legacy API key")
            }
        }
    }
}

fn parse<T: FromStr>(
    vars: &HashMap<String, String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = vars.get(key).map(String::as_str).unwrap_or(default);

    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn api_key(vars: &HashMap<String, String>) -> Result<(String, ApiKeySource), ConfigError> {
    if let Some(key) = vars.get("CAFE_API_KEY").filter(|k| !k.is_empty()) {
        return Ok((key.clone(), ApiKeySource::Env));
    }

    if let Some(path) = vars.get("CAFE_API_KEY_FILE") {
        let key = fs::read_to_string(path)
            .map(|s| s.trim().to_string())
            .map_err(|source| ConfigError::SecretFile {
                path: path.clone(),
                source,
            })?;
        return Ok((key, ApiKeySource::File(path.clone())));
    }

    Ok((LEGACY_API_KEY.to_string(), ApiKeySource::Legacy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite://cafes.db");
        assert_eq!(config.api_key, LEGACY_API_KEY);
        assert_eq!(config.api_key_source, ApiKeySource::Legacy);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vars(&vars(&[
            ("CAFE_API_ADDR", "0.0.0.0:8080"),
            ("DATABASE_URL", "sqlite:///tmp/test.db"),
            ("CAFE_API_KEY", "s3cret"),
            ("CAFE_API_LOG_LEVEL", "debug"),
            ("CAFE_API_REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.database_url, "sqlite:///tmp/test.db");
        assert_eq!(config.api_key, "s3cret");
        assert_eq!(config.api_key_source, ApiKeySource::Env);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_port() {
        let err = Config::from_vars(&vars(&[("CAFE_API_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "CAFE_API_ADDR", .. }
        ));
    }

    #[test]
    fn test_api_key_file() {
        let path = env::temp_dir().join(format!("cafe-api-key-{}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "from-file").unwrap();

        let config = Config::from_vars(&vars(&[(
            "CAFE_API_KEY_FILE",
            path.to_str().unwrap(),
        )]))
        .unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(
            config.api_key_source,
            ApiKeySource::File(path.to_str().unwrap().to_string())
        );

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_empty_env_key_falls_back() {
        let config = Config::from_vars(&vars(&[("CAFE_API_KEY", "")])).unwrap();
        assert_eq!(config.api_key, LEGACY_API_KEY);
        assert_eq!(config.api_key_source, ApiKeySource::Legacy);
    }

    #[test]
    fn test_missing_api_key_file() {
        let err = Config::from_vars(&vars(&[("CAFE_API_KEY_FILE", "/nonexistent/key")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::SecretFile { .. }));
    }
}
