use std::env;
use std::net::IpAddr;

use rocket::figment::Figment;

const DEFAULT_ADDRESS: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_POOL_MAX: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url:      String,
    pub pool_max: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub address:      IpAddr,
    pub port:         u16,
    pub database_url: Option<String>,
    pub pool_max:     u32,
}

impl AppConfig {
    /// Reads the process environment after loading any `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let address = lookup("EMPLOYEES_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string());
        let port = parse_or("EMPLOYEES_PORT", &lookup, DEFAULT_PORT)?;
        let pool_max = parse_or("DATABASE_POOL_MAX", &lookup, DEFAULT_POOL_MAX)?;

        Ok(AppConfig {
            address: address
                .parse()
                .map_err(|_| ConfigError::Invalid { var: "EMPLOYEES_ADDRESS", value: address.clone() })?,
            port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            pool_max,
        })
    }

    pub fn database(&self) -> Result<DatabaseConfig, ConfigError> {
        let url = self.database_url.clone().ok_or(ConfigError::Missing("DATABASE_URL"))?;
        Ok(DatabaseConfig { url, pool_max: self.pool_max })
    }

    /// Rocket's own configuration with the bind address and port overridden.
    pub fn figment(&self) -> Figment {
        rocket::Config::figment()
            .merge(("address", self.address))
            .merge(("port", self.port))
    }
}

fn parse_or<T, F>(var: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
