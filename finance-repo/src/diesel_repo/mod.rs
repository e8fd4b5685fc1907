mod schema;
mod transaction_repo;
mod user_repo;

use crate::diesel_repo::transaction_repo::DieselTransactionRepo;
use crate::diesel_repo::user_repo::DieselUserRepo;
use crate::transaction_repo::TransactionRepo;
use crate::user_repo::UserRepo;
use anyhow::Context;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection};
use diesel::SqliteConnection;
use r2d2::{Pool, PooledConnection};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Settings applied to every connection the pool hands out.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_pool(database_path: &Path, max_pool_size: u32) -> Result<DbPool, anyhow::Error> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create database directory {}", parent.display())
            })?;
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(database_path.to_string_lossy());
    let pool = Pool::builder()
        .max_size(max_pool_size)
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: Duration::from_secs(5),
        }))
        .build(manager)
        .context("Unable to create database connection pool")?;

    let mut db_conn = pool.get().context("Unable to get connection from pool")?;
    db_conn
        .batch_execute(schema::CREATE_TABLES)
        .context("Unable to initialize database schema")?;
    info!(database = %database_path.display(), "Database ready");

    Ok(pool)
}

pub fn create_repos(
    database_path: &Path,
    max_pool_size: u32,
) -> Result<(Arc<dyn UserRepo>, Arc<dyn TransactionRepo>), anyhow::Error> {
    let pool = create_pool(database_path, max_pool_size)?;

    let user_repo = DieselUserRepo::new(pool.clone());
    let transaction_repo = DieselTransactionRepo::new(pool);
    Ok((Arc::new(user_repo), Arc::new(transaction_repo)))
}

fn get_connection(pool: &DbPool) -> Result<DbConnection, anyhow::Error> {
    pool.get().context("Unable to get connection from pool")
}
