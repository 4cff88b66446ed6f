// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::{IssueService, State};

use crate::display::format_json;
use crate::error::Result;

use super::{open_service, print_lines};

pub fn run(
    db: Option<&Path>,
    id: &str,
    to: &str,
    expected_version: Option<i64>,
    json: bool,
) -> Result<()> {
    let (mut svc, _) = open_service(db)?;
    print_lines(&run_impl(&mut svc, id, to, expected_version, json)?);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
pub(crate) fn run_impl(
    svc: &mut IssueService,
    id: &str,
    to: &str,
    expected_version: Option<i64>,
    json: bool,
) -> Result<Vec<String>> {
    let to: State = to.parse()?;
    let issue = svc.transition(id, to, expected_version)?;
    if json {
        return Ok(vec![format_json(&issue)?]);
    }
    Ok(vec![format!(
        "updated {} to {} (v{})",
        issue.id, issue.state, issue.version
    )])
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
