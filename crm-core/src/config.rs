//! Global crm configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SERVER_PORT;
use crate::error::{CrmError, CrmResult};

static DEFAULT_DATA_FILE: &str = "~/crm/events.json";

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_server_url() -> String {
    format!("http://127.0.0.1:{}", DEFAULT_SERVER_PORT)
}

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

/// `CRM_PORT`, `CRM_WOOCOMMERCE__CONSUMER_KEY`, ...
fn environment() -> Environment {
    Environment::with_prefix("CRM").prefix_separator("_").separator("__")
}

/// Global configuration at ~/.config/crm/config.toml
///
/// Any key can be overridden from the environment with a `CRM_` prefix,
/// nested keys separated by `__` (e.g. `CRM_WOOCOMMERCE__CONSUMER_KEY`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CrmConfig {
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Where the CLI reaches crm-server
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Port crm-server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub woocommerce: Option<WooCredentials>,
}

/// WooCommerce REST API credentials
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WooCredentials {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
}

impl WooCredentials {
    /// Fails naming the first blank field.
    pub fn validate(&self) -> CrmResult<()> {
        let fields = [
            ("base_url", &self.base_url),
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(CrmError::MissingCredentials(format!("{} is not set", name))),
            None => Ok(()),
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        CrmConfig {
            data_file: default_data_file(),
            server_url: default_server_url(),
            port: default_port(),
            woocommerce: None,
        }
    }
}

impl CrmConfig {
    pub fn config_path() -> CrmResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CrmError::Config("Could not determine config directory".into()))?
            .join("crm");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file on
    /// first run.
    pub fn load() -> CrmResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CrmResult<Self> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: &Path, env: Environment) -> CrmResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| CrmError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CrmError::Config(e.to_string()))
    }

    /// Save the current config to ~/.config/crm/config.toml
    pub fn save(&self) -> CrmResult<()> {
        let config_path = Self::config_path()?;

        let content = toml::to_string_pretty(self).map_err(|e| CrmError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| CrmError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// The event store file with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn credentials(&self) -> CrmResult<&WooCredentials> {
        let creds = self
            .woocommerce
            .as_ref()
            .ok_or_else(|| CrmError::MissingCredentials("no [woocommerce] section configured".into()))?;
        creds.validate()?;
        Ok(creds)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CrmResult<()> {
        let contents = format!(
            "\
# crm configuration

# Where events are stored:
# data_file = \"{}\"

# crm-server address used by the CLI, and the port the server binds:
# server_url = \"{}\"
# port = {}

# WooCommerce REST API credentials for product sync:
# [woocommerce]
# base_url = \"https://shop.example.com\"
# consumer_key = \"ck_...\"
# consumer_secret = \"cs_...\"
",
            DEFAULT_DATA_FILE,
            default_server_url(),
            DEFAULT_SERVER_PORT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CrmError::Config(format!("Could not create config directory: {e}")))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CrmError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm/config.toml");
        CrmConfig::create_default_config(&path).unwrap();

        let config = CrmConfig::load_from(&path).unwrap();
        assert_eq!(config.port, DEFAULT_SERVER_PORT);
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(config.woocommerce.is_none());
    }

    #[test]
    fn test_woocommerce_section_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "port = 5000\n[woocommerce]\nbase_url = \"https://shop.example\"\nconsumer_key = \"ck\"\nconsumer_secret = \"cs\"\n",
        )
        .unwrap();

        let config = CrmConfig::load_from(&path).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.credentials().unwrap().base_url, "https://shop.example");
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 5000\n").unwrap();

        let vars = [
            ("CRM_PORT", "5001"),
            ("CRM_WOOCOMMERCE__BASE_URL", "https://shop.example"),
            ("CRM_WOOCOMMERCE__CONSUMER_KEY", "ck_env"),
            ("CRM_WOOCOMMERCE__CONSUMER_SECRET", "cs_env"),
        ];
        let env = environment().source(Some(
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        ));

        let config = CrmConfig::load_with_env(&path, env).unwrap();
        assert_eq!(config.port, 5001);
        let creds = config.credentials().unwrap();
        assert_eq!(creds.consumer_key, "ck_env");
        assert_eq!(creds.consumer_secret, "cs_env");
    }

    #[test]
    fn test_missing_credentials_are_reported() {
        let config = CrmConfig::default();
        assert!(matches!(config.credentials(), Err(CrmError::MissingCredentials(_))));

        let config = CrmConfig {
            woocommerce: Some(WooCredentials {
                base_url: "https://shop.example".into(),
                consumer_key: "ck".into(),
                consumer_secret: " ".into(),
            }),
            ..CrmConfig::default()
        };
        let err = config.credentials().unwrap_err();
        assert!(err.to_string().contains("consumer_secret"));
    }

    #[test]
    fn test_data_path_expands_tilde() {
        let config = CrmConfig::default();
        assert!(!config.data_path().to_string_lossy().starts_with('~'));
    }
}
