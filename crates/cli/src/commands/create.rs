// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::{Category, CreateIssue, IssueService};

use crate::config::Config;
use crate::display::format_json;
use crate::error::Result;

use super::{open_service, parse_csv, print_lines};

#[allow(clippy::too_many_arguments)]
pub fn run(
    db: Option<&Path>,
    project: Option<&str>,
    category: &str,
    title: &str,
    body: &str,
    parent: Option<&str>,
    blocked_by: Option<&str>,
    json: bool,
) -> Result<()> {
    let (mut svc, config) = open_service(db)?;
    let lines = run_impl(
        &mut svc, &config, project, category, title, body, parent, blocked_by, json,
    )?;
    print_lines(&lines);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run_impl(
    svc: &mut IssueService,
    config: &Config,
    project: Option<&str>,
    category: &str,
    title: &str,
    body: &str,
    parent: Option<&str>,
    blocked_by: Option<&str>,
    json: bool,
) -> Result<Vec<String>> {
    let category: Category = category.parse()?;
    let mut input = CreateIssue::new(config.project(project).unwrap_or_default(), category, title)
        .body(body)
        .blocked_by(blocked_by.map(parse_csv).unwrap_or_default());
    if let Some(parent) = parent {
        input = input.parent(parent);
    }

    let issue = svc.create(input)?;
    if json {
        return Ok(vec![format_json(&issue)?]);
    }
    Ok(vec![format!("created {} (v{})", issue.id, issue.version)])
}

#[cfg(test)]
#[path = "create_tests.rs"]
mod tests;
