// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use it_core::{Issue, TreeNode};

use crate::error::Result;

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Pretty JSON, as printed by every `--json` flag.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format an issue as `key: value` lines. Optional fields only appear when set.
pub fn format_issue_details(issue: &Issue) -> Vec<String> {
    let mut lines = vec![
        format!("id: {}", issue.id),
        format!("project: {}", issue.project_prefix),
        format!("category: {}", issue.category),
        format!("state: {}", issue.state),
        format!("version: {}", issue.version),
    ];
    if let Some(parent) = &issue.parent_id {
        lines.push(format!("parent: {parent}"));
    }
    lines.push(format!("title: {}", issue.title));
    if !issue.body.is_empty() {
        lines.push(format!("body: {}", issue.body));
    }
    if !issue.blocked_by.is_empty() {
        lines.push(format!("blocked_by: {}", issue.blocked_by.join(",")));
    }
    lines.push(format!("created_at: {}", timestamp(&issue.created_at)));
    lines.push(format!(
        "last_updated_at: {}",
        timestamp(&issue.last_updated_at)
    ));
    if let Some(closed) = &issue.closed_at {
        lines.push(format!("closed_at: {}", timestamp(closed)));
    }
    lines
}

/// Format an issue as one tab-separated list row.
pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "{}\t{}\t{}\tv{}\t{}",
        issue.id, issue.category, issue.state, issue.version, issue.title
    )
}

/// Format a forest depth-first, two spaces of indent per level.
pub fn format_tree(forest: &[TreeNode]) -> Vec<String> {
    let mut lines = Vec::new();
    for node in forest {
        push_tree_node(node, 0, &mut lines);
    }
    lines
}

fn push_tree_node(node: &TreeNode, level: usize, lines: &mut Vec<String>) {
    let issue = &node.issue;
    lines.push(format!(
        "{}- {} ({}) [{}] v{} {}",
        "  ".repeat(level),
        issue.id,
        issue.category,
        issue.state,
        issue.version,
        issue.title
    ));
    for child in &node.children {
        push_tree_node(child, level + 1, lines);
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
