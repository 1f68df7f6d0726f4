use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_WEKA_JAR: &str = "weka.jar";
pub const DEFAULT_MODEL: &str = "Randomforest.model";
pub const DEFAULT_JAVA: &str = "java";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid SERVER_PORT {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Paths for the external classifier plus the listen address.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub java_bin: PathBuf,
    pub weka_jar_path: PathBuf,
    pub model_path: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            java_bin: PathBuf::from(DEFAULT_JAVA),
            weka_jar_path: PathBuf::from(DEFAULT_WEKA_JAR),
            model_path: PathBuf::from(DEFAULT_MODEL),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset or empty keys
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("SERVER_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self {
            java_bin: get("JAVA_BIN").map(PathBuf::from).unwrap_or(defaults.java_bin),
            weka_jar_path: get("WEKA_JAR_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.weka_jar_path),
            model_path: get("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            host: get("SERVER_HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr(), ("127.0.0.1".to_string(), 8080));
    }

    #[test]
    fn reads_paths_and_address() {
        let config = AppConfig::from_lookup(lookup(&[
            ("WEKA_JAR_PATH", "/opt/weka/weka.jar"),
            ("MODEL_PATH", "/srv/models/rf.model"),
            ("JAVA_BIN", "/usr/lib/jvm/bin/java"),
            ("SERVER_HOST", "0.0.0.0"),
            ("SERVER_PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.weka_jar_path, PathBuf::from("/opt/weka/weka.jar"));
        assert_eq!(config.model_path, PathBuf::from("/srv/models/rf.model"));
        assert_eq!(config.java_bin, PathBuf::from("/usr/lib/jvm/bin/java"));
        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 9000));
    }

    #[test]
    fn empty_values_fall_back() {
        let config =
            AppConfig::from_lookup(lookup(&[("MODEL_PATH", ""), ("SERVER_PORT", " ")])).unwrap();
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL));
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("SERVER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "eighty"));
    }
}
