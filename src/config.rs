//! Runtime configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default: `10`)
//! - `AUTO_MIGRATE`: apply the bundled schema at startup (default: `true`)
//! - `LANE_SHIFT_POLICY`: `all` (default) | `at_or_after`
//! - `HOST`: server host address (default: `0.0.0.0`)
//! - `PORT`: server port (default: `8080`)

use crate::todo::domain::{ParseShiftPolicyError, ShiftPolicy};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_PORT: u16 = 8080;

/// Storage backend for tasks and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage. Suitable for tests and development.
    #[default]
    InMemory,
    /// `PostgreSQL` storage through Diesel.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` has an unknown value.
    #[error("invalid STORAGE_MODE '{0}', expected in_memory or postgres")]
    InvalidStorageMode(String),

    /// `DATABASE_URL` is missing while postgres storage is selected.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A variable could not be parsed.
    #[error("invalid value '{value}' for {name}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// `LANE_SHIFT_POLICY` has an unknown value.
    #[error(transparent)]
    InvalidShiftPolicy(#[from] ParseShiftPolicyError),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL, when postgres storage is selected.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Whether to apply the bundled schema at startup.
    pub auto_migrate: bool,
    /// Which siblings make room on explicit moves.
    pub shift_policy: ShiftPolicy,
    /// Address the HTTP server binds to.
    pub bind_address: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            auto_migrate: true,
            shift_policy: ShiftPolicy::default(),
            bind_address: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
        }
    }
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is malformed or a
    /// required one is missing.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is malformed or a
    /// required one is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let database_url = read("DATABASE_URL");
        if storage_mode == StorageMode::Postgres && database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }

        let pool_size = parse_var::<u32, _>(&read, "DATABASE_POOL_SIZE")?
            .filter(|size| *size > 0)
            .unwrap_or(defaults.pool_size);
        let auto_migrate = read("AUTO_MIGRATE")
            .map(|value| parse_flag("AUTO_MIGRATE", &value))
            .transpose()?
            .unwrap_or(defaults.auto_migrate);
        let shift_policy = read("LANE_SHIFT_POLICY")
            .map(|value| value.parse::<ShiftPolicy>())
            .transpose()?
            .unwrap_or_default();

        let host = parse_var::<IpAddr, _>(&read, "HOST")?.unwrap_or(defaults.bind_address.ip());
        let port = parse_var::<u16, _>(&read, "PORT")?.unwrap_or(defaults.bind_address.port());

        Ok(Self {
            storage_mode,
            database_url,
            pool_size,
            auto_migrate,
            shift_policy,
            bind_address: SocketAddr::new(host, port),
        })
    }
}

fn parse_var<T, F>(read: &F, name: &'static str) -> Result<Option<T>, ConfigurationError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    read(name)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigurationError::InvalidValue { name, value })
        })
        .transpose()
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigurationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigurationError::InvalidValue {
            name,
            value: value.to_owned(),
        }),
    }
}
