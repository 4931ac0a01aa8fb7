use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};

use crate::error::ApiError;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Builds the connection pool for the configured database URL.
/// Panics if the database is unreachable at startup.
pub fn create_pool(database_url: &str) -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder()
        .build(manager)
        .expect("failed to connect to the database")
}

/// Checks out a connection, mapping pool exhaustion into an API error.
pub fn get_db_conn(pool: &DbPool) -> Result<DbConn, ApiError> {
    pool.get().map_err(|e| ApiError::Pool(e.to_string()))
}
