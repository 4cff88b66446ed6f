// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue identifiers: `{prefix}-{number}`.
//!
//! The prefix is a 3-character lowercase alphanumeric project code. New
//! numbers are drawn at random from a 6-digit range; the store's primary key
//! catches the rare collision and the service retries.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};

// Hard-coded patterns, exercised by the tests below.
static PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^[a-z0-9]{3}$") {
    Ok(re) => re,
    Err(_) => unreachable!("static regex pattern"),
});
static ISSUE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[a-z0-9]{3}-[0-9]+$") {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Smallest issue number handed out by [`RandomNumbers`].
pub const NUMBER_MIN: u32 = 100_000;
/// Largest issue number handed out by [`RandomNumbers`].
pub const NUMBER_MAX: u32 = 999_999;

/// Source of candidate issue numbers.
pub trait NumberSource {
    /// Returns the next candidate number.
    fn next_number(&mut self) -> u32;
}

/// Uniformly random numbers in `NUMBER_MIN..=NUMBER_MAX`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNumbers;

impl NumberSource for RandomNumbers {
    fn next_number(&mut self) -> u32 {
        rand::rng().random_range(NUMBER_MIN..=NUMBER_MAX)
    }
}

impl<F: FnMut() -> u32> NumberSource for F {
    fn next_number(&mut self) -> u32 {
        self()
    }
}

/// Returns true if `prefix` is exactly 3 lowercase alphanumeric characters.
pub fn is_valid_prefix(prefix: &str) -> bool {
    PREFIX_RE.is_match(prefix)
}

/// Returns true if `id` has the shape `{prefix}-{digits}`.
pub fn is_valid_issue_id(id: &str) -> bool {
    ISSUE_ID_RE.is_match(id)
}

/// Trim and lowercase a project prefix, rejecting anything malformed.
pub fn normalize_prefix(raw: &str) -> Result<String> {
    let prefix = raw.trim().to_lowercase();
    if !is_valid_prefix(&prefix) {
        return Err(Error::InvalidInput(format!(
            "project prefix '{}' must be exactly 3 lowercase alphanumeric chars",
            raw.trim()
        )));
    }
    Ok(prefix)
}

/// Extract the project prefix from an issue id, if it has one.
pub fn project_prefix(id: &str) -> Option<&str> {
    let (prefix, _) = id.split_once('-')?;
    is_valid_prefix(prefix).then_some(prefix)
}

/// Format an issue id from its parts.
pub fn format_id(prefix: &str, number: u32) -> String {
    format!("{prefix}-{number}")
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
