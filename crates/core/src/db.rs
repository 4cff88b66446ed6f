// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed store for issues.
//!
//! The [`Database`] struct owns the connection and the schema. Row-level
//! helpers take a plain `&Connection` so the service can call them on a
//! `Transaction` as well.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};
use crate::id::project_prefix;
use crate::issue::{Issue, State};

/// Table definition for the issue store, parameterized by table name.
fn table_schema(table: &str) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {table} (
    id TEXT PRIMARY KEY,
    category TEXT NOT NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    state TEXT NOT NULL DEFAULT 'todo',
    parent_id TEXT,
    version INTEGER NOT NULL DEFAULT 1,
    blocked_by TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    last_updated_at TEXT NOT NULL,
    closed_at TEXT,
    FOREIGN KEY (parent_id) REFERENCES {table}(id) ON DELETE SET NULL
);
"#
    )
}

/// Indexes, applied after any table rebuild.
pub const INDEX_SCHEMA: &str = r#"
CREATE INDEX IF NOT EXISTS idx_issues_parent ON issues(parent_id);
CREATE INDEX IF NOT EXISTS idx_issues_state ON issues(state);
"#;

/// Columns of the canonical `issues` table, in select order.
const COLUMNS: [&str; 11] = [
    "id",
    "category",
    "title",
    "body",
    "state",
    "parent_id",
    "version",
    "blocked_by",
    "created_at",
    "last_updated_at",
    "closed_at",
];

const SELECT_ISSUE: &str = "SELECT id, category, title, body, state, parent_id, version,
        blocked_by, created_at, last_updated_at, closed_at
 FROM issues";

/// Milliseconds SQLite waits on a locked database before giving up.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse a timestamp from the database.
///
/// Rows written by this crate use RFC 3339; rows carried over from older
/// databases use SQLite's `CURRENT_TIMESTAMP` layout in UTC.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_blocked_by(
    value: Option<String>,
    id: &str,
) -> std::result::Result<Vec<String>, rusqlite::Error> {
    match value {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
            .map_err(|e| corrupted(format!("invalid blocked_by for {id}: {e}"))),
        _ => Ok(Vec::new()),
    }
}

/// Format a timestamp for storage.
///
/// Fixed-width nanosecond RFC 3339 keeps lexical order equal to time order.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn issue_from_row(row: &Row<'_>) -> std::result::Result<Issue, rusqlite::Error> {
    let id: String = row.get(0)?;
    let category: String = row.get(1)?;
    let state: String = row.get(4)?;
    let blocked_by: Option<String> = row.get(7)?;
    let created: String = row.get(8)?;
    let updated: String = row.get(9)?;
    let closed: Option<String> = row.get(10)?;

    Ok(Issue {
        project_prefix: project_prefix(&id).unwrap_or_default().to_string(),
        category: parse_db(&category, "category")?,
        title: row.get(2)?,
        body: row.get(3)?,
        state: parse_db(&state, "state")?,
        parent_id: row.get(5)?,
        version: row.get(6)?,
        blocked_by: parse_blocked_by(blocked_by, &id)?,
        created_at: parse_timestamp(&created, "created_at")?,
        last_updated_at: parse_timestamp(&updated, "last_updated_at")?,
        closed_at: closed
            .map(|c| parse_timestamp(&c, "closed_at"))
            .transpose()?,
        id,
    })
}

/// Look up an issue by exact id.
pub fn find_issue(conn: &Connection, id: &str) -> Result<Option<Issue>> {
    let sql = format!("{SELECT_ISSUE} WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], issue_from_row).optional()?)
}

/// Look up an issue by exact id, failing with not-found if absent.
pub fn load_issue(conn: &Connection, id: &str) -> Result<Issue> {
    find_issue(conn, id)?.ok_or_else(|| Error::issue_not_found(id))
}

/// Check if an issue exists.
pub fn issue_exists(conn: &Connection, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM issues WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// List issues, oldest first, optionally filtered by an already-validated
/// project prefix and by state.
pub fn query_issues(
    conn: &Connection,
    prefix: Option<&str>,
    state: Option<State>,
) -> Result<Vec<Issue>> {
    let mut conditions = Vec::new();
    let mut args: Vec<String> = Vec::new();
    if let Some(prefix) = prefix {
        args.push(format!("{prefix}-%"));
        conditions.push(format!("id LIKE ?{}", args.len()));
    }
    if let Some(state) = state {
        args.push(state.as_str().to_string());
        conditions.push(format!("state = ?{}", args.len()));
    }

    let mut sql = SELECT_ISSUE.to_string();
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY created_at ASC, id ASC");

    let mut stmt = conn.prepare(&sql)?;
    let issues = stmt
        .query_map(params_from_iter(args.iter()), issue_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(issues)
}

/// Returns true if `err` is a primary-key or unique constraint violation.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        }
        _ => false,
    }
}

/// Run schema creation and all migrations on a database connection.
///
/// Idempotent: safe to run on every open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(&table_schema("issues"))?;
    migrate_issues_shape(conn)?;
    migrate_legacy_timestamps(conn)?;
    migrate_drop_legacy_tables(conn)?;
    conn.execute_batch(INDEX_SCHEMA)?;
    Ok(())
}

fn issue_columns(conn: &Connection) -> Result<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('issues')")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<HashSet<_>, _>>()?;
    Ok(columns)
}

/// Migration: rebuild an older `issues` table into the canonical shape.
///
/// Columns that exist are copied; missing ones get their defaults. Extra
/// columns are dropped.
fn migrate_issues_shape(conn: &Connection) -> Result<()> {
    let columns = issue_columns(conn)?;
    if columns.len() == COLUMNS.len() && COLUMNS.iter().all(|c| columns.contains(*c)) {
        return Ok(());
    }

    let has = |name: &str| columns.contains(name);
    let pick = |name: &'static str, fallback: &'static str| if has(name) { name } else { fallback };

    let created = pick("created_at", "strftime('%Y-%m-%d %H:%M:%S','now')");
    let updated = if has("last_updated_at") {
        "last_updated_at"
    } else if has("updated_at") {
        "updated_at"
    } else {
        created
    };
    let copy = format!(
        "INSERT INTO issues_new (id, category, title, body, state, parent_id, version,
             blocked_by, created_at, last_updated_at, closed_at)
         SELECT id, {}, title, {}, {}, {}, {}, {}, {created}, {updated}, {} FROM issues",
        pick("category", "'task'"),
        pick("body", "''"),
        pick("state", "'todo'"),
        pick("parent_id", "NULL"),
        pick("version", "1"),
        pick("blocked_by", "'[]'"),
        pick("closed_at", "NULL"),
    );
    tracing::info!("rebuilding issues table into current shape");

    // PRAGMA foreign_keys cannot change inside a transaction.
    conn.execute("PRAGMA foreign_keys = OFF", [])?;
    let result = (|| -> Result<()> {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS issues_new;")?;
        tx.execute_batch(&table_schema("issues_new"))?;
        tx.execute(&copy, [])?;
        tx.execute_batch(
            "DROP TABLE issues;
             ALTER TABLE issues_new RENAME TO issues;",
        )?;
        tx.commit()?;
        Ok(())
    })();
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    result
}

/// SQLite `datetime()` layout written by earlier releases.
const LEGACY_TIMESTAMP_GLOB: &str =
    "[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9] [0-9][0-9]:[0-9][0-9]:[0-9][0-9]";

/// Migration: rewrite `YYYY-MM-DD HH:MM:SS` timestamps in the layout of
/// [`format_timestamp`], so text order matches time order again.
fn migrate_legacy_timestamps(conn: &Connection) -> Result<()> {
    let mut rewritten = 0;
    for column in ["created_at", "last_updated_at", "closed_at"] {
        rewritten += conn.execute(
            &format!(
                "UPDATE issues SET {column} = replace({column}, ' ', 'T') || '.000000000Z'
                 WHERE {column} GLOB ?1"
            ),
            params![LEGACY_TIMESTAMP_GLOB],
        )?;
    }
    if rewritten > 0 {
        tracing::info!("normalized {} legacy timestamps", rewritten);
    }
    Ok(())
}

/// Migration: drop tables from earlier releases.
fn migrate_drop_legacy_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DROP TRIGGER IF EXISTS trg_issues_updated_at;
         DROP TABLE IF EXISTS issue_state_history;
         DROP TABLE IF EXISTS projects;",
    )?;
    Ok(())
}

/// SQLite database connection holding the issue table.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrent processes
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"
        ))?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Get an issue by ID.
    pub fn get_issue(&self, id: &str) -> Result<Issue> {
        load_issue(&self.conn, id)
    }

    /// List issues with optional filters, oldest first.
    pub fn list_issues(&self, prefix: Option<&str>, state: Option<State>) -> Result<Vec<Issue>> {
        query_issues(&self.conn, prefix, state)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
