use crate::error::AppResult;
use crate::models::{Schema, TableInfo};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Fetch all user tables and their columns from a SQLite database.
///
/// Tables come back in creation order (sqlite_master order); columns in
/// declaration order. Internal `sqlite_*` tables are skipped. One read-only
/// connection per call, nothing cached.
pub fn introspect(db_path: &Path) -> AppResult<Schema> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")?;
    let table_names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<String>, _>>()?;

    let mut schema = Vec::with_capacity(table_names.len());
    for name in table_names {
        let columns = table_columns(&conn, &name)?;
        schema.push(TableInfo { name, columns });
    }

    Ok(schema)
}

fn table_columns(conn: &Connection, table: &str) -> AppResult<Vec<String>> {
    // PRAGMA table_info takes an identifier, not a bind parameter
    let mut stmt = conn.prepare(&format!(
        "PRAGMA table_info(\"{}\")",
        table.replace('"', "\"\"")
    ))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(columns)
}
