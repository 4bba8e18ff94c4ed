pub mod models;
pub mod repositories;
pub mod schema;

pub mod mock;

use cutandgo_core::errors::BookingError;
use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Wraps a driver error for repositories that return `BookingResult`.
pub(crate) fn db_error(err: sqlx::Error) -> BookingError {
    BookingError::Database(err.into())
}

/// Postgres `unique_violation`.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
