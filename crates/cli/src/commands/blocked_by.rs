// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::IssueService;

use crate::display::format_json;
use crate::error::Result;

use super::{open_service, parse_csv, print_lines};

/// `set = None` clears the list.
pub fn run(
    db: Option<&Path>,
    id: &str,
    set: Option<&str>,
    expected_version: Option<i64>,
    json: bool,
) -> Result<()> {
    let (mut svc, _) = open_service(db)?;
    print_lines(&run_impl(&mut svc, id, set, expected_version, json)?);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
pub(crate) fn run_impl(
    svc: &mut IssueService,
    id: &str,
    set: Option<&str>,
    expected_version: Option<i64>,
    json: bool,
) -> Result<Vec<String>> {
    let ids = set.map(parse_csv).unwrap_or_default();
    let issue = svc.set_blocked_by(id, &ids, expected_version)?;
    if json {
        return Ok(vec![format_json(&issue)?]);
    }
    Ok(vec![format!(
        "updated blocked_by for {} (v{})",
        issue.id, issue.version
    )])
}

#[cfg(test)]
#[path = "blocked_by_tests.rs"]
mod tests;
