// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::{IssueService, State};

use crate::config::Config;
use crate::display::{format_issue_line, format_json};
use crate::error::Result;

use super::{open_service, print_lines};

pub fn run(db: Option<&Path>, project: Option<&str>, state: Option<&str>, json: bool) -> Result<()> {
    let (svc, config) = open_service(db)?;
    print_lines(&run_impl(&svc, &config, project, state, json)?);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
pub(crate) fn run_impl(
    svc: &IssueService,
    config: &Config,
    project: Option<&str>,
    state: Option<&str>,
    json: bool,
) -> Result<Vec<String>> {
    let state = match state.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(raw.parse::<State>()?),
        None => None,
    };
    let issues = svc.list_issues(config.project(project), state)?;

    if json {
        return Ok(vec![format_json(&issues)?]);
    }
    Ok(issues.iter().map(format_issue_line).collect())
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
