use crate::error::AppResult;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use serde_json::Value;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;
use std::path::Path;

/// Outcome of running model-generated SQL.
///
/// Execution failures (bad syntax, missing tables, constraint violations)
/// are data, not errors: the request must not fail because the model wrote
/// a bad query. Only opening the database can error upward.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecOutcome {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    Failed {
        message: String,
    },
}

/// Run one SQL statement against the database at `db_path` and materialize
/// every result row.
///
/// With `read_only` set the connection refuses writes, so destructive
/// statements turn into `Failed` outcomes instead of mutating the upload.
pub fn execute(db_path: &Path, sql: &str, read_only: bool) -> AppResult<ExecOutcome> {
    if sql.trim().is_empty() {
        return Ok(ExecOutcome::Failed {
            message: "empty SQL statement".to_string(),
        });
    }
    if let Some(n) = statement_count(sql) {
        if n == 0 {
            return Ok(ExecOutcome::Failed {
                message: "empty SQL statement".to_string(),
            });
        }
        if n > 1 {
            return Ok(ExecOutcome::Failed {
                message: format!("expected exactly one SQL statement, got {n}"),
            });
        }
    }

    let conn = if read_only {
        Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?
    } else {
        Connection::open(db_path)?
    };

    match run_statement(&conn, sql) {
        Ok(outcome) => Ok(outcome),
        Err(e) => Ok(ExecOutcome::Failed {
            message: e.to_string(),
        }),
    }
}

/// Number of statements the parser sees, or `None` when the text uses
/// SQLite syntax the parser does not understand. Unparseable input falls
/// through to SQLite itself, which stays the authority on what is valid;
/// a trailing second statement is still caught there at prepare time.
fn statement_count(sql: &str) -> Option<usize> {
    Parser::parse_sql(&SQLiteDialect {}, sql)
        .ok()
        .map(|statements| statements.len())
}

fn run_statement(conn: &Connection, sql: &str) -> Result<ExecOutcome, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;

    let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
    if columns.is_empty() {
        // Non-SELECT statement: no result set
        stmt.execute([])?;
        return Ok(ExecOutcome::Rows {
            columns: Vec::new(),
            rows: Vec::new(),
        });
    }

    let ncols = columns.len();
    let mut rows_out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut out = Vec::with_capacity(ncols);
        for i in 0..ncols {
            out.push(value_to_json(row.get_ref(i)?));
        }
        rows_out.push(out);
    }

    Ok(ExecOutcome::Rows {
        columns,
        rows: rows_out,
    })
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    use base64::Engine;
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Value::from(f),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => {
            Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
    }
}
