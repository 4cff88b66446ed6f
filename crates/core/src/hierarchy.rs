// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Category rules for the project → workstream → task hierarchy.

use crate::error::{Error, Result};
use crate::issue::{Category, Issue};

/// Maximum number of levels in the hierarchy (project, workstream, task).
pub const MAX_DEPTH: usize = 3;

/// Required parent category for each category; `None` forbids a parent.
pub const PARENT_RULES: &[(Category, Option<Category>)] = &[
    (Category::Project, None),
    (Category::Workstream, Some(Category::Project)),
    (Category::Task, Some(Category::Workstream)),
];

/// Returns the category an issue of `category` must have as parent.
pub fn required_parent(category: Category) -> Option<Category> {
    PARENT_RULES
        .iter()
        .find(|(child, _)| *child == category)
        .and_then(|(_, parent)| *parent)
}

/// Check the presence or absence of a parent against the category rules.
///
/// `parent_id` is the already-trimmed candidate; an empty string counts as
/// absent.
pub fn check_parent_presence(category: Category, parent_id: Option<&str>) -> Result<()> {
    let has_parent = parent_id.is_some_and(|p| !p.is_empty());
    match required_parent(category) {
        Some(required) if !has_parent => Err(Error::InvalidInput(format!(
            "category '{category}' requires a parent of category '{required}'"
        ))),
        None if has_parent => Err(Error::InvalidInput(format!(
            "category '{category}' cannot have a parent"
        ))),
        _ => Ok(()),
    }
}

/// Check that a resolved `parent` may hold a child of `category` in `project`.
pub fn check_parent(category: Category, project: &str, parent: &Issue) -> Result<()> {
    if parent.project_prefix != project {
        return Err(Error::InvalidInput(format!(
            "parent issue '{}' must be in project '{project}'",
            parent.id
        )));
    }
    match required_parent(category) {
        Some(required) if parent.category == required => Ok(()),
        Some(required) => Err(Error::InvalidInput(format!(
            "category '{category}' requires a parent of category '{required}', '{}' is a {}",
            parent.id, parent.category
        ))),
        None => Err(Error::InvalidInput(format!(
            "category '{category}' cannot have a parent"
        ))),
    }
}

#[cfg(test)]
#[path = "hierarchy_tests.rs"]
mod tests;
