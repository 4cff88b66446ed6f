// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::IssueService;

use crate::display::format_json;
use crate::error::Result;

use super::{open_service, print_lines};

/// `parent = None` clears the parent.
pub fn run(
    db: Option<&Path>,
    id: &str,
    parent: Option<&str>,
    expected_version: Option<i64>,
    json: bool,
) -> Result<()> {
    let (mut svc, _) = open_service(db)?;
    print_lines(&run_impl(&mut svc, id, parent, expected_version, json)?);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
pub(crate) fn run_impl(
    svc: &mut IssueService,
    id: &str,
    parent: Option<&str>,
    expected_version: Option<i64>,
    json: bool,
) -> Result<Vec<String>> {
    let issue = svc.set_parent(id, parent, expected_version)?;
    if json {
        return Ok(vec![format_json(&issue)?]);
    }
    let line = match &issue.parent_id {
        Some(parent) => format!(
            "set parent of {} to {} (v{})",
            issue.id, parent, issue.version
        ),
        None => format!("cleared parent for {} (v{})", issue.id, issue.version),
    };
    Ok(vec![line])
}

#[cfg(test)]
#[path = "parent_tests.rs"]
mod tests;
