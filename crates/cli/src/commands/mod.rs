// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod blocked_by;
pub mod create;
pub mod list;
pub mod parent;
pub mod show;
pub mod state;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod tree;

use std::path::Path;

use it_core::{Database, IssueService};

use crate::config::{Config, DB_PATH_ENV};
use crate::error::Result;

/// Discover config from the current directory and open the issue service.
///
/// `db` is the `--db` flag, which wins over every other source.
pub fn open_service(db: Option<&Path>) -> Result<(IssueService, Config)> {
    let config = Config::discover(&std::env::current_dir()?)?;
    let env = std::env::var(DB_PATH_ENV).ok();
    let path = config.db_path(db, env.as_deref());
    tracing::debug!("opening database {}", path.display());
    let service = IssueService::new(Database::open(&path)?);
    Ok((service, config))
}

/// Split a comma-separated id list, dropping blank entries.
pub(crate) fn parse_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
