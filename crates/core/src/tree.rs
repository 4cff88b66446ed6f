// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Forest projection of the parent hierarchy.

use std::collections::HashMap;

use crate::issue::{Issue, TreeNode};

/// Build a forest from a creation-ordered issue list.
///
/// Parentless issues become roots. Every other issue hangs under its parent,
/// keeping input order among siblings. An issue whose parent is absent from
/// `issues` is not reachable from any root.
pub fn build_forest(issues: Vec<Issue>) -> Vec<TreeNode> {
    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<Issue>> = HashMap::new();
    for issue in issues {
        match issue.parent_id.clone() {
            Some(parent) => children.entry(parent).or_default().push(issue),
            None => roots.push(issue),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children))
        .collect()
}

fn attach(issue: Issue, children: &mut HashMap<String, Vec<Issue>>) -> TreeNode {
    // Removing the entry guarantees each issue is placed at most once.
    let kids = children.remove(&issue.id).unwrap_or_default();
    TreeNode {
        children: kids
            .into_iter()
            .map(|child| attach(child, children))
            .collect(),
        issue,
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
