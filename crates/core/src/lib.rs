// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! it-core: issue service for the `it` tracker
//!
//! This crate owns the issue model, the SQLite store, and the [`IssueService`]
//! that enforces the project → workstream → task hierarchy, the state machine,
//! blocked-by dependencies, and optimistic concurrency.

pub mod blocked_by;
pub mod db;
pub mod error;
pub mod hierarchy;
pub mod id;
pub mod issue;
pub mod service;
pub mod transition;
pub mod tree;

pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use id::{NumberSource, RandomNumbers};
pub use issue::{Category, Issue, State, TreeNode};
pub use service::{CreateIssue, IssueService};
