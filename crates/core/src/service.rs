// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The issue service: the only code path that writes issue rows.
//!
//! Every mutation opens one `BEGIN IMMEDIATE` transaction, validates against
//! the rows it reads inside that transaction, and finishes with a single
//! conditional `UPDATE ... WHERE id = ? [AND version = ?]`. Any error drops the
//! transaction, which rolls it back.

use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, TransactionBehavior};

use crate::blocked_by;
use crate::db::{find_issue, format_timestamp, is_unique_violation, load_issue, Database};
use crate::error::{Error, Result};
use crate::hierarchy::{check_parent, check_parent_presence, MAX_DEPTH};
use crate::id::{format_id, normalize_prefix, NumberSource, RandomNumbers};
use crate::issue::{Category, Issue, State, TreeNode};
use crate::transition::validate_transition;
use crate::tree::build_forest;

/// Attempts at drawing an unused issue number before giving up.
pub const MAX_CREATE_ATTEMPTS: usize = 8;

/// Input for [`IssueService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssue {
    pub project: String,
    pub category: Category,
    pub title: String,
    pub body: String,
    pub parent_id: Option<String>,
    pub blocked_by: Vec<String>,
}

impl CreateIssue {
    pub fn new(project: impl Into<String>, category: Category, title: impl Into<String>) -> Self {
        CreateIssue {
            project: project.into(),
            category,
            title: title.into(),
            body: String::new(),
            parent_id: None,
            blocked_by: Vec::new(),
        }
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn blocked_by<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocked_by = ids.into_iter().map(Into::into).collect();
        self
    }
}

/// Transactional operations over the issue table.
pub struct IssueService<N: NumberSource = RandomNumbers> {
    db: Database,
    numbers: N,
}

impl IssueService<RandomNumbers> {
    /// Create a service drawing issue numbers at random.
    pub fn new(db: Database) -> Self {
        Self::with_numbers(db, RandomNumbers)
    }
}

impl<N: NumberSource> IssueService<N> {
    /// Create a service with a custom issue number source.
    pub fn with_numbers(db: Database, numbers: N) -> Self {
        IssueService { db, numbers }
    }

    /// The underlying store.
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Create an issue in state `todo` at version 1.
    ///
    /// Parent and dependency checks run inside the same transaction as the
    /// insert. An id collision discards the transaction and retries with a
    /// fresh number, up to [`MAX_CREATE_ATTEMPTS`] times.
    pub fn create(&mut self, input: CreateIssue) -> Result<Issue> {
        let project = normalize_prefix(&input.project)?;
        let title = input.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("title is required".to_string()));
        }
        let parent_id = input
            .parent_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty());
        check_parent_presence(input.category, parent_id)?;

        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            let id = format_id(&project, self.numbers.next_number());
            let tx = self
                .db
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            if let Some(parent_id) = parent_id {
                let parent = find_issue(&tx, parent_id)?.ok_or_else(|| {
                    Error::NotFound(format!("parent issue '{parent_id}' not found"))
                })?;
                check_parent(input.category, &project, &parent)?;
            }
            let deps = blocked_by::normalize(&tx, &id, &project, &input.blocked_by)?;

            let now = format_timestamp(&Utc::now());
            let inserted = tx.execute(
                "INSERT INTO issues (id, category, title, body, state, parent_id, version,
                     blocked_by, created_at, last_updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?8, ?8)",
                params![
                    id,
                    input.category.as_str(),
                    title,
                    input.body,
                    State::Todo.as_str(),
                    parent_id,
                    serde_json::to_string(&deps)?,
                    now,
                ],
            );
            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    tracing::debug!("issue id {} taken (attempt {}), retrying", id, attempt);
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            let issue = load_issue(&tx, &id)?;
            tx.commit()?;
            tracing::debug!("created {} ({})", issue.id, issue.category);
            return Ok(issue);
        }

        tracing::warn!(
            "no free issue number for project {} after {} attempts",
            project,
            MAX_CREATE_ATTEMPTS
        );
        Err(Error::Conflict(format!(
            "failed to allocate an issue number in project '{project}' after {MAX_CREATE_ATTEMPTS} attempts"
        )))
    }

    /// Get an issue by id.
    pub fn get_issue(&self, id: &str) -> Result<Issue> {
        self.db.get_issue(id.trim())
    }

    /// List issues oldest first, optionally filtered by project and state.
    ///
    /// A blank project filter means all projects. The filter is an exact
    /// prefix match, so a prefix no issue can carry matches nothing.
    pub fn list_issues(&self, project: Option<&str>, state: Option<State>) -> Result<Vec<Issue>> {
        let project = match project.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => match normalize_prefix(raw) {
                Ok(prefix) => Some(prefix),
                Err(_) => return Ok(Vec::new()),
            },
            None => None,
        };
        self.db.list_issues(project.as_deref(), state)
    }

    /// Move an issue to state `to`.
    ///
    /// Moving to the current state is a no-op that leaves the row untouched,
    /// though a supplied `expected_version` must still match.
    pub fn transition(
        &mut self,
        id: &str,
        to: State,
        expected_version: Option<i64>,
    ) -> Result<Issue> {
        let id = id.trim();
        let tx = self
            .db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let issue = load_issue(&tx, id)?;

        if issue.state == to {
            if let Some(expected) = expected_version {
                if expected != issue.version {
                    return Err(stale(id, expected, issue.version));
                }
            }
            return Ok(issue);
        }

        validate_transition(issue.state, to)?;
        if to == State::InProgress {
            let pending = blocked_by::unresolved(&tx, &issue)?;
            if !pending.is_empty() {
                return Err(Error::InvalidInput(format!(
                    "blocked_by not done: {}",
                    pending.join(", ")
                )));
            }
        }

        let now = format_timestamp(&Utc::now());
        let closed_at = if to.is_closed() {
            Value::Text(now.clone())
        } else {
            Value::Null
        };
        let updated = compare_and_swap(
            &tx,
            id,
            expected_version,
            &now,
            vec![
                ("state", Value::Text(to.as_str().to_string())),
                ("closed_at", closed_at),
            ],
        )?;
        tx.commit()?;
        tracing::debug!(
            "{} {} -> {} (v{})",
            id,
            issue.state,
            updated.state,
            updated.version
        );
        Ok(updated)
    }

    /// Reassign or clear (`parent_id = None`) the parent of an issue.
    pub fn set_parent(
        &mut self,
        id: &str,
        parent_id: Option<&str>,
        expected_version: Option<i64>,
    ) -> Result<Issue> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidInput("id is required".to_string()));
        }
        let parent_id = parent_id.map(str::trim).filter(|p| !p.is_empty());

        let tx = self
            .db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let issue = load_issue(&tx, id)?;
        check_parent_presence(issue.category, parent_id)?;

        if let Some(parent_id) = parent_id {
            let parent = find_issue(&tx, parent_id)?.ok_or_else(|| {
                Error::NotFound(format!("parent issue '{parent_id}' not found"))
            })?;
            check_parent(issue.category, &issue.project_prefix, &parent)?;
            check_ancestry(&tx, id, parent)?;
        }

        let now = format_timestamp(&Utc::now());
        let parent_value = parent_id.map_or(Value::Null, |p| Value::Text(p.to_string()));
        let updated = compare_and_swap(
            &tx,
            id,
            expected_version,
            &now,
            vec![("parent_id", parent_value)],
        )?;
        tx.commit()?;
        tracing::debug!(
            "{} parent -> {} (v{})",
            id,
            parent_id.unwrap_or("none"),
            updated.version
        );
        Ok(updated)
    }

    /// Replace the dependency list of an issue. An empty list clears it.
    pub fn set_blocked_by(
        &mut self,
        id: &str,
        ids: &[String],
        expected_version: Option<i64>,
    ) -> Result<Issue> {
        let id = id.trim();
        if id.is_empty() {
            return Err(Error::InvalidInput("id is required".to_string()));
        }

        let tx = self
            .db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let issue = load_issue(&tx, id)?;
        let deps = blocked_by::normalize(&tx, &issue.id, &issue.project_prefix, ids)?;

        let now = format_timestamp(&Utc::now());
        let updated = compare_and_swap(
            &tx,
            id,
            expected_version,
            &now,
            vec![("blocked_by", Value::Text(serde_json::to_string(&deps)?))],
        )?;
        tx.commit()?;
        tracing::debug!(
            "{} blocked_by -> [{}] (v{})",
            id,
            updated.blocked_by.join(", "),
            updated.version
        );
        Ok(updated)
    }

    /// Build the parent forest for a project, or for every issue.
    pub fn tree(&self, project: Option<&str>) -> Result<Vec<TreeNode>> {
        Ok(build_forest(self.list_issues(project, None)?))
    }
}

fn stale(id: &str, expected: i64, actual: i64) -> Error {
    Error::Conflict(format!(
        "stale write on '{id}': expected version {expected}, found {actual}"
    ))
}

/// Apply `assignments` to one row, bumping `version` and `last_updated_at`.
///
/// The row must match `expected_version` when one is given. When nothing
/// matches, a surviving row means the version moved on (conflict); no row
/// means not found.
fn compare_and_swap(
    conn: &Connection,
    id: &str,
    expected_version: Option<i64>,
    now: &str,
    assignments: Vec<(&str, Value)>,
) -> Result<Issue> {
    let mut sets = Vec::new();
    let mut args = Vec::new();
    for (column, value) in assignments {
        args.push(value);
        sets.push(format!("{column} = ?{}", args.len()));
    }
    args.push(Value::Text(now.to_string()));
    sets.push(format!("last_updated_at = ?{}", args.len()));
    sets.push("version = version + 1".to_string());

    args.push(Value::Text(id.to_string()));
    let mut sql = format!(
        "UPDATE issues SET {} WHERE id = ?{}",
        sets.join(", "),
        args.len()
    );
    if let Some(expected) = expected_version {
        args.push(Value::Integer(expected));
        sql.push_str(&format!(" AND version = ?{}", args.len()));
    }

    let changed = conn.execute(&sql, params_from_iter(args.iter()))?;
    if changed == 0 {
        return match (expected_version, find_issue(conn, id)?) {
            (Some(expected), Some(current)) => Err(stale(id, expected, current.version)),
            _ => Err(Error::issue_not_found(id)),
        };
    }
    load_issue(conn, id)
}

/// Walk up from `parent`, failing if the chain reaches `id` or grows deeper
/// than the hierarchy allows.
fn check_ancestry(conn: &Connection, id: &str, parent: Issue) -> Result<()> {
    // The issue itself is the first level.
    let mut depth = 1;
    let mut current = Some(parent);
    while let Some(node) = current {
        if node.id == id {
            return Err(Error::CycleDetected(format!(
                "'{id}' is an ancestor of its proposed parent"
            )));
        }
        depth += 1;
        if depth > MAX_DEPTH {
            return Err(Error::DepthExceeded(format!(
                "parent chain above '{id}' is deeper than {MAX_DEPTH} levels"
            )));
        }
        current = match node.parent_id {
            Some(next) => find_issue(conn, &next)?,
            None => None,
        };
    }
    Ok(())
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
