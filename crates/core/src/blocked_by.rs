// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Blocked-by dependency lists.
//!
//! Dependencies are stored on the blocked issue as a JSON array of ids in the
//! same project. [`normalize`] canonicalizes caller input against the store;
//! [`unresolved`] reports which dependencies still hold an issue back.

use rusqlite::Connection;
use std::collections::HashSet;

use crate::db::{find_issue, issue_exists};
use crate::error::{Error, Result};
use crate::id::{is_valid_issue_id, project_prefix};
use crate::issue::{Issue, State};

/// Canonicalize a dependency list for `issue_id` in `project`.
///
/// Entries are trimmed and lowercased, empties dropped, and duplicates
/// collapsed keeping first-seen order. Malformed, self-referencing and
/// cross-project ids are invalid input; ids with no row are not found.
pub fn normalize(
    conn: &Connection,
    issue_id: &str,
    project: &str,
    raw: &[String],
) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for entry in raw {
        let id = entry.trim().to_lowercase();
        if id.is_empty() {
            continue;
        }
        if !is_valid_issue_id(&id) {
            return Err(Error::InvalidInput(format!(
                "invalid blocked_by issue id '{id}'"
            )));
        }
        if id == issue_id {
            return Err(Error::InvalidInput(
                "blocked_by cannot include the issue itself".to_string(),
            ));
        }
        if !seen.insert(id.clone()) {
            continue;
        }
        if project_prefix(&id) != Some(project) {
            return Err(Error::InvalidInput(format!(
                "blocked_by issue '{id}' must be in project '{project}'"
            )));
        }
        if !issue_exists(conn, &id)? {
            return Err(Error::NotFound(format!(
                "blocked_by issue '{id}' not found"
            )));
        }
        out.push(id);
    }

    Ok(out)
}

/// Returns the dependencies of `issue` that are not yet done, in list order.
///
/// A dependency whose row has disappeared is reported as not found rather
/// than silently treated as resolved.
pub fn unresolved(conn: &Connection, issue: &Issue) -> Result<Vec<String>> {
    let mut pending = Vec::new();
    for dep in &issue.blocked_by {
        match find_issue(conn, dep)? {
            Some(found) if found.state == State::Done => {}
            Some(_) => pending.push(dep.clone()),
            None => {
                return Err(Error::NotFound(format!(
                    "blocked_by issue '{dep}' not found"
                )))
            }
        }
    }
    Ok(pending)
}

#[cfg(test)]
#[path = "blocked_by_tests.rs"]
mod tests;
