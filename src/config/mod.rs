//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `QASCORE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_INFERENCE_TIMEOUT, DEFAULT_LANGUAGE};
use crate::normalize::{NormalizerOptions, Script};

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QASCORE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// LaBSE model directory. `None` runs a stub encoder.
    pub labse_path: Option<PathBuf>,

    /// paraphrase-multilingual-MiniLM-L12-v2 model directory. `None` runs a stub encoder.
    pub pml_path: Option<PathBuf>,

    /// Normalizer language code. Default: `hi`.
    pub language: String,

    /// Strip nuktas during normalization. Default: `false`.
    pub remove_nuktas: bool,

    /// Fold candra vowels and candrabindu. Default: `false`.
    pub normalize_chandras: bool,

    /// Upper bound on one scoring call. Default: 30s.
    pub inference_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            labse_path: None,
            pml_path: None,
            language: DEFAULT_LANGUAGE.to_string(),
            remove_nuktas: false,
            normalize_chandras: false,
            inference_timeout: DEFAULT_INFERENCE_TIMEOUT,
        }
    }
}

impl Config {
    pub const ENV_PORT: &'static str = "QASCORE_PORT";
    pub const ENV_BIND_ADDR: &'static str = "QASCORE_BIND_ADDR";
    pub const ENV_LABSE_PATH: &'static str = "QASCORE_LABSE_PATH";
    pub const ENV_PML_PATH: &'static str = "QASCORE_PML_PATH";
    pub const ENV_LANGUAGE: &'static str = "QASCORE_LANGUAGE";
    pub const ENV_REMOVE_NUKTAS: &'static str = "QASCORE_REMOVE_NUKTAS";
    pub const ENV_NORMALIZE_CHANDRAS: &'static str = "QASCORE_NORMALIZE_CHANDRAS";
    pub const ENV_INFERENCE_TIMEOUT_MS: &'static str = "QASCORE_INFERENCE_TIMEOUT_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let labse_path = Self::parse_optional_path_from_env(Self::ENV_LABSE_PATH);
        let pml_path = Self::parse_optional_path_from_env(Self::ENV_PML_PATH);
        let language = Self::parse_string_from_env(Self::ENV_LANGUAGE, defaults.language);
        let remove_nuktas =
            Self::parse_bool_from_env(Self::ENV_REMOVE_NUKTAS, defaults.remove_nuktas)?;
        let normalize_chandras =
            Self::parse_bool_from_env(Self::ENV_NORMALIZE_CHANDRAS, defaults.normalize_chandras)?;
        let inference_timeout = Self::parse_timeout_from_env(defaults.inference_timeout)?;

        Ok(Self {
            port,
            bind_addr,
            labse_path,
            pml_path,
            language,
            remove_nuktas,
            normalize_chandras,
            inference_timeout,
        })
    }

    /// Validates paths and the language code (does not load models).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for path in [&self.labse_path, &self.pml_path].into_iter().flatten() {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if Script::for_language(&self.language).is_none() {
            return Err(ConfigError::UnsupportedLanguage {
                language: self.language.clone(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        match self.bind_addr {
            IpAddr::V4(addr) => format!("{}:{}", addr, self.port),
            IpAddr::V6(addr) => format!("[{}]:{}", addr, self.port),
        }
    }

    /// Normalizer switches derived from this config.
    pub fn normalizer_options(&self) -> NormalizerOptions {
        NormalizerOptions {
            remove_nuktas: self.remove_nuktas,
            normalize_chandras: self.normalize_chandras,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(var_name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidBool {
                    name: var_name,
                    value,
                }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_INFERENCE_TIMEOUT_MS) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
                _ => Err(ConfigError::InvalidTimeout { value }),
            },
            Err(_) => Ok(default),
        }
    }
}
