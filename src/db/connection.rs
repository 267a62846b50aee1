use rusqlite::Connection;
use std::cell::RefCell;
use std::fs;

use crate::errors::ServerError;

// One connection per worker thread, opened lazily.
thread_local! {
    static DB_CONN: RefCell<Option<Connection>> = RefCell::new(None);
}

/// Cheap, cloneable handle; the actual connection lives in the
/// thread-local slot above.
#[derive(Clone)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Run `f` with this thread's connection, opening it on first use.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONN
            .try_with(|cell| {
                let mut slot = cell.borrow_mut();
                if slot.is_none() {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("open db failed: {e}")))?;
                    conn.execute_batch("pragma foreign_keys = on;")
                        .map_err(|e| ServerError::DbError(format!("set pragma failed: {e}")))?;
                    *slot = Some(conn);
                }
                let conn = slot.as_mut().expect("connection just initialized");
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Apply the schema file to the database (idempotent DDL).
pub fn init_db(db: &Database, schema_path: &str) -> Result<(), ServerError> {
    let schema_sql = fs::read_to_string(schema_path)
        .map_err(|e| ServerError::DbError(format!("read schema file failed: {e}")))?;

    db.with_conn(|conn| {
        conn.execute_batch(&schema_sql)
            .map_err(|e| ServerError::DbError(format!("apply schema failed: {e}")))
    })
}
