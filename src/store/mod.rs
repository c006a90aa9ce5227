//! Record store for employee rows.
//!
//! The service only talks to [`EmployeeRepository`]; which backend sits behind
//! it is decided once at startup.

mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use std::fmt;
use std::sync::Arc;

pub use self::memory::MemoryRepository;

use crate::config::{AppConfig, ConfigError};
use crate::models::Employee;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Store lock poisoned")]
    Poisoned,

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Minimal query interface over the `employees` table.
///
/// Each call is atomic on its own. Nothing here spans more than one call, so
/// check-then-act sequences built on top of it are not atomic.
pub trait EmployeeRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>>;

    fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>>;

    /// All rows, ordered by id.
    fn find_all(&self) -> StoreResult<Vec<Employee>>;

    /// Inserts when `employee.id` is zero (assigning a fresh id), otherwise
    /// inserts-or-updates the row with that id.
    fn save(&self, employee: Employee) -> StoreResult<Employee>;

    fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}

/// Which record store a build serves from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Postgres,
}

impl Backend {
    /// Whether rows survive a restart.
    pub fn is_durable(self) -> bool {
        matches!(self, Backend::Postgres)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Memory => f.write_str("memory"),
            Backend::Postgres => f.write_str("postgres"),
        }
    }
}

/// Opens the store this build was compiled for.
#[cfg(feature = "postgres")]
pub fn open(config: &AppConfig) -> StoreResult<(Arc<dyn EmployeeRepository>, Backend)> {
    let repo = postgres::PostgresRepository::connect(&config.database()?)?;
    Ok((Arc::new(repo), Backend::Postgres))
}

#[cfg(not(feature = "postgres"))]
pub fn open(_config: &AppConfig) -> StoreResult<(Arc<dyn EmployeeRepository>, Backend)> {
    Ok((Arc::new(MemoryRepository::new()), Backend::Memory))
}
