// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::IssueService;

use crate::display::{format_issue_details, format_json};
use crate::error::Result;

use super::{open_service, print_lines};

pub fn run(db: Option<&Path>, id: &str, json: bool) -> Result<()> {
    let (svc, _) = open_service(db)?;
    print_lines(&run_impl(&svc, id, json)?);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
pub(crate) fn run_impl(svc: &IssueService, id: &str, json: bool) -> Result<Vec<String>> {
    let issue = svc.get_issue(id)?;
    if json {
        return Ok(vec![format_json(&issue)?]);
    }
    Ok(format_issue_details(&issue))
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
