//! Configuration loading and management

use crate::core::error::{ConfigError, ListingsResult};
use crate::core::query::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable naming the YAML configuration file
pub const CONFIG_ENV: &str = "LISTINGS_CONFIG";
/// Environment variable overriding [`ServerConfig::bind`]
pub const BIND_ENV: &str = "LISTINGS_BIND";
/// Environment variable overriding [`ServerConfig::data_dir`]
pub const DATA_DIR_ENV: &str = "LISTINGS_DATA_DIR";

/// Cross-origin settings for the browser/mobile client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API
    pub allowed_origins: Vec<String>,

    /// Whether cookies and credentials may be sent
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:8081".to_string(),
                "http://127.0.0.1:8081".to_string(),
            ],
            allow_credentials: true,
        }
    }
}

/// Complete server configuration
///
/// Every field has a default, so an empty YAML document is a valid
/// configuration.
///
/// # Example
/// ```yaml
/// bind: "127.0.0.1:8000"
/// data_dir: "/var/lib/listings"
/// default_limit: 50
/// cors:
///   allowed_origins: ["http://localhost:8081"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind: String,

    /// Directory the collection file names are resolved against
    pub data_dir: PathBuf,

    /// Listings file; must exist before the first request
    pub properties_file: PathBuf,

    /// Favorites file; created empty when missing
    pub favorites_file: PathBuf,

    /// Users file; created empty when missing
    pub users_file: PathBuf,

    /// Page size of `GET /imoveis` when no `limit` is given
    pub default_limit: usize,

    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            data_dir: PathBuf::from("."),
            properties_file: PathBuf::from("imoveis.json"),
            favorites_file: PathBuf::from("favoritos.json"),
            users_file: PathBuf::from("usuarios.json"),
            default_limit: DEFAULT_LIMIT,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ListingsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        serde_yaml::from_str::<Self>(&content)
            .map_err(|e| ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })?
            .validated()
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> ListingsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Load from `path` when given, otherwise start from the defaults
    ///
    /// `LISTINGS_BIND` and `LISTINGS_DATA_DIR` override the loaded values.
    pub fn load(path: Option<&Path>) -> ListingsResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.bind = bind;
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        config.validated()
    }

    /// Load using the file named by `LISTINGS_CONFIG`, if any
    pub fn from_env() -> ListingsResult<Self> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::load(path.as_deref())
    }

    fn validated(self) -> ListingsResult<Self> {
        self.bind
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue {
                field: "bind".to_string(),
                value: self.bind.clone(),
                message: e.to_string(),
            })?;

        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_limit".to_string(),
                value: "0".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }

        Ok(self)
    }

    /// Absolute file names are kept; relative ones are joined to `data_dir`
    fn resolve(&self, file: &Path) -> PathBuf {
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            self.data_dir.join(file)
        }
    }

    pub fn properties_path(&self) -> PathBuf {
        self.resolve(&self.properties_file)
    }

    pub fn favorites_path(&self) -> PathBuf {
        self.resolve(&self.favorites_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.resolve(&self.users_file)
    }
}
