// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use it_core::IssueService;

use crate::config::Config;
use crate::display::{format_json, format_tree};
use crate::error::Result;

use super::{open_service, print_lines};

pub fn run(db: Option<&Path>, project: Option<&str>, json: bool) -> Result<()> {
    let (svc, config) = open_service(db)?;
    print_lines(&run_impl(&svc, &config, project, json)?);
    Ok(())
}

/// Internal implementation that accepts the service for testing.
pub(crate) fn run_impl(
    svc: &IssueService,
    config: &Config,
    project: Option<&str>,
    json: bool,
) -> Result<Vec<String>> {
    let forest = svc.tree(config.project(project))?;
    if json {
        return Ok(vec![format_json(&forest)?]);
    }
    Ok(format_tree(&forest))
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
