use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, PooledConnection};
use dotenv::dotenv;
use std::env;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type Conn = PooledConnection<ConnectionManager<SqliteConnection>>;

no_arg_sql_function!(last_insert_rowid, diesel::sql_types::Integer);

/// Sqlite leaves foreign keys off unless every connection asks for them.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn create_connection_pool() -> DbPool {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .expect("Failed to create pool.")
}

/// Id of the row inserted last on this connection. Sqlite has no RETURNING,
/// so inserts requery through this.
pub fn last_insert_id(conn: &SqliteConnection) -> Result<i32, diesel::result::Error> {
    diesel::select(last_insert_rowid).get_result(conn)
}

#[cfg(test)]
pub fn create_test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    // A single connection keeps every test request on the same in-memory
    // database.
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .expect("Failed to create test pool.");
    let conn = pool.get().expect("Failed to get test connection.");
    conn.batch_execute(include_str!(
        "../migrations/2020-09-12-000000_create_blog_tables/up.sql"
    ))
    .expect("Failed to create test schema.");
    pool
}
