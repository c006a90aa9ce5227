//! PostgreSQL record store using Diesel.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::upsert::excluded;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::{EmployeeRepository, StoreError, StoreResult};
use crate::config::DatabaseConfig;
use crate::models::Employee;

mod models;
mod schema;

use self::models::{EmployeeRow, EmployeeUpsertRow, NewEmployeeRow};
use self::schema::employees;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type PgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Builds the pool and runs pending migrations.
    pub fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(config.url.as_str());
        let pool = Pool::builder()
            .max_size(config.pool_max)
            .build(manager)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let repo = PostgresRepository { pool };
        repo.with_conn(|conn| {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|_| ())
                .map_err(|e| StoreError::Query(format!("Migration error: {e}")))
        })?;

        Ok(repo)
    }

    fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> StoreResult<T>,
    {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        f(&mut conn)
    }
}

fn query_error(err: diesel::result::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

impl EmployeeRepository for PostgresRepository {
    fn find_by_id(&self, id: i64) -> StoreResult<Option<Employee>> {
        self.with_conn(|conn| {
            employees::table
                .find(id)
                .select(EmployeeRow::as_select())
                .first(conn)
                .optional()
                .map(|row| row.map(Employee::from))
                .map_err(query_error)
        })
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<Employee>> {
        self.with_conn(|conn| {
            employees::table
                .filter(employees::email.eq(email))
                .order(employees::id.asc())
                .select(EmployeeRow::as_select())
                .first(conn)
                .optional()
                .map(|row| row.map(Employee::from))
                .map_err(query_error)
        })
    }

    fn find_all(&self) -> StoreResult<Vec<Employee>> {
        self.with_conn(|conn| {
            employees::table
                .order(employees::id.asc())
                .select(EmployeeRow::as_select())
                .load(conn)
                .map(|rows| rows.into_iter().map(Employee::from).collect())
                .map_err(query_error)
        })
    }

    fn save(&self, employee: Employee) -> StoreResult<Employee> {
        self.with_conn(|conn| {
            let row = if employee.is_persisted() {
                diesel::insert_into(employees::table)
                    .values(&EmployeeUpsertRow {
                        id:         employee.id,
                        first_name: &employee.first_name,
                        last_name:  &employee.last_name,
                        email:      &employee.email,
                    })
                    .on_conflict(employees::id)
                    .do_update()
                    .set((
                        employees::first_name.eq(excluded(employees::first_name)),
                        employees::last_name.eq(excluded(employees::last_name)),
                        employees::email.eq(excluded(employees::email)),
                    ))
                    .returning(EmployeeRow::as_returning())
                    .get_result(conn)
            } else {
                diesel::insert_into(employees::table)
                    .values(&NewEmployeeRow {
                        first_name: &employee.first_name,
                        last_name:  &employee.last_name,
                        email:      &employee.email,
                    })
                    .returning(EmployeeRow::as_returning())
                    .get_result(conn)
            };
            row.map(Employee::from).map_err(query_error)
        })
    }

    fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        self.with_conn(|conn| {
            diesel::delete(employees::table.find(id))
                .execute(conn)
                .map(|_| ())
                .map_err(query_error)
        })
    }
}
