pub mod migrations;
pub mod queries;

use anyhow::Context;
use rusqlite::Connection;

/// Open the SQLite database (a file path or `:memory:`), set connection
/// pragmas, and bring the schema up to date.
pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn =
        Connection::open(path).with_context(|| format!("failed to open database at {path}"))?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
