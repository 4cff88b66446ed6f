// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for the it issue tracker.
//!
//! This module contains the fundamental data types: Issue, Category, State,
//! and TreeNode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Position of an issue in the project → workstream → task hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Top-level container. Never has a parent.
    Project,
    /// A stream of work inside a project.
    Workstream,
    /// Unit of work inside a workstream.
    Task,
}

impl Category {
    #[cfg(test)]
    pub(crate) const ALL: [Category; 3] = [Category::Project, Category::Workstream, Category::Task];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Project => "project",
            Category::Workstream => "workstream",
            Category::Task => "task",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Accepts full names and the single-letter shorthands `p`, `w`, `t`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "project" | "p" => Ok(Category::Project),
            "workstream" | "w" => Ok(Category::Workstream),
            "task" | "t" => Ok(Category::Task),
            _ => Err(Error::InvalidInput(format!(
                "unknown category '{s}' (use task|workstream|project or t|w|p)"
            ))),
        }
    }
}

/// Workflow state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// Not yet started. Initial state for new issues.
    Todo,
    /// Currently being worked on.
    InProgress,
    /// Waiting on something outside the tracker.
    Blocked,
    /// Successfully completed.
    Done,
    /// Abandoned without completion.
    Canceled,
}

impl State {
    pub const ALL: [State; 5] = [
        State::Todo,
        State::InProgress,
        State::Blocked,
        State::Done,
        State::Canceled,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Todo => "todo",
            State::InProgress => "in_progress",
            State::Blocked => "blocked",
            State::Done => "done",
            State::Canceled => "canceled",
        }
    }

    /// Returns true for states that carry a `closed_at` timestamp.
    pub fn is_closed(&self) -> bool {
        matches!(self, State::Done | State::Canceled)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for State {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(State::Todo),
            "in_progress" => Ok(State::InProgress),
            "blocked" => Ok(State::Blocked),
            "done" => Ok(State::Done),
            "canceled" => Ok(State::Canceled),
            _ => Err(Error::InvalidInput(format!(
                "unknown state '{s}' (use todo|in_progress|blocked|done|canceled)"
            ))),
        }
    }
}

/// A tracked work item, fully materialized from its row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier (format: `{prefix}-{number}`).
    pub id: String,
    /// Project prefix, derived from `id`.
    pub project_prefix: String,
    pub category: Category,
    pub title: String,
    pub body: String,
    pub state: State,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Optimistic-concurrency token, bumped on every mutation.
    pub version: i64,
    /// Dependencies that must be done before this issue can start.
    pub blocked_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
    /// Set while the issue is done or canceled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

/// One node of the hierarchy forest built by [`crate::tree::build_forest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub issue: Issue,
    pub children: Vec<TreeNode>,
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
