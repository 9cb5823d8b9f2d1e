//! Environment-driven application settings.
//!
//! Every variable has a default so the server starts with no configuration
//! at all. Values are read through [`mockable::Env`] so parsing can be tested
//! without touching the process environment.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use mockable::{DefaultEnv, Env};

const PORT_ENV: &str = "PORT";
const BIND_ADDRESS_ENV: &str = "BIND_ADDRESS";
const STORAGE_BACKEND_ENV: &str = "STORAGE_BACKEND";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const SQLITE_PATH_ENV: &str = "SQLITE_PATH";
const POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";
const STATIC_DIR_ENV: &str = "STATIC_DIR";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
/// Unencrypted local fallback for `DATABASE_URL`.
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost:5432/million_meters";
/// Fallback for `SQLITE_PATH`, relative to the working directory.
pub const DEFAULT_SQLITE_PATH: &str = "data/swimming.db";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_STATIC_DIR: &str = "public";

/// Storage engine selected by `STORAGE_BACKEND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(()),
        }
    }
}

/// Where the data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSettings {
    Postgres { database_url: String },
    Sqlite { path: PathBuf },
}

impl StorageSettings {
    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::Postgres { .. } => StorageBackend::Postgres,
            Self::Sqlite { .. } => StorageBackend::Sqlite,
        }
    }
}

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for the server and the schema preparation tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub bind_address: IpAddr,
    pub port: u16,
    pub storage: StorageSettings,
    pub pool_max_size: u32,
    pub static_dir: PathBuf,
}

impl AppSettings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppSettings::from_env`].
    pub fn from_process_env() -> Result<Self, ConfigError> {
        Self::from_env(&DefaultEnv::new())
    }

    /// Read settings from the environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use million_meters::config::{AppSettings, StorageBackend};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "STORAGE_BACKEND" => Some("sqlite".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.storage.backend(), StorageBackend::Sqlite);
    /// assert_eq!(settings.port, 3000);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when a set variable cannot be
    /// parsed.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ConfigError> {
        let port = parse_or(env, PORT_ENV, DEFAULT_PORT, "a TCP port between 0 and 65535")?;
        let bind_address = parse_or(
            env,
            BIND_ADDRESS_ENV,
            default_bind_address(),
            "an IP address",
        )?;
        let backend = parse_or(
            env,
            STORAGE_BACKEND_ENV,
            StorageBackend::Postgres,
            "postgres|sqlite",
        )?;
        let storage = match backend {
            StorageBackend::Postgres => StorageSettings::Postgres {
                database_url: non_empty(env, DATABASE_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            },
            StorageBackend::Sqlite => StorageSettings::Sqlite {
                path: PathBuf::from(
                    non_empty(env, SQLITE_PATH_ENV)
                        .unwrap_or_else(|| DEFAULT_SQLITE_PATH.to_owned()),
                ),
            },
        };
        let pool_max_size = parse_or(
            env,
            POOL_MAX_SIZE_ENV,
            DEFAULT_POOL_MAX_SIZE,
            "a positive integer",
        )?;
        if pool_max_size == 0 {
            return Err(ConfigError::InvalidEnv {
                name: POOL_MAX_SIZE_ENV,
                value: "0".to_owned(),
                expected: "a positive integer",
            });
        }
        let static_dir = PathBuf::from(
            non_empty(env, STATIC_DIR_ENV).unwrap_or_else(|| DEFAULT_STATIC_DIR.to_owned()),
        );

        Ok(Self {
            bind_address,
            port,
            storage,
            pool_max_size,
            static_dir,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: DEFAULT_PORT,
            storage: StorageSettings::Postgres {
                database_url: DEFAULT_DATABASE_URL.to_owned(),
            },
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

fn default_bind_address() -> IpAddr {
    IpAddr::from_str(DEFAULT_BIND_ADDRESS).unwrap_or(IpAddr::from([0, 0, 0, 0]))
}

fn non_empty<E: Env>(env: &E, name: &str) -> Option<String> {
    env.string(name).filter(|value| !value.trim().is_empty())
}

fn parse_value<T: FromStr>(
    name: &'static str,
    raw: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: raw.to_owned(),
        expected,
    })
}

fn parse_or<E: Env, T: FromStr>(
    env: &E,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match non_empty(env, name) {
        Some(raw) => parse_value(name, &raw, expected),
        None => Ok(default),
    }
}
