// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

const COMMANDS_HELP: &str = "\
Issues:
  create      Create a project, workstream or task
  show        Show one issue
  list        List issues
  state       Move an issue through its workflow
  parent      Reassign or clear an issue's parent
  blocked-by  Replace an issue's dependencies
  tree        Show the project hierarchy";

const CONFIG_HELP: &str = "\
itconfig (found by walking up from the current directory):
  db=.it/issues.db
  project=cat

Exit codes: 0 ok, 2 invalid input, 3 not found, 4 conflict, 1 other";

#[derive(Parser)]
#[command(name = "it", version)]
#[command(about = "A hierarchical issue tracker backed by SQLite")]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = CONFIG_HELP)]
pub struct Cli {
    /// SQLite database path (overrides itconfig and IT_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an issue
    #[command(after_help = "Examples:\n  \
        it create --project cat -c p --title \"Launch\"\n  \
        it create -c w -p cat-100001 --title \"Backend\"\n  \
        it create -p cat-100002 --title \"Schema\" --blocked-by cat-100003")]
    Create {
        /// 3-char project prefix (defaults to itconfig project)
        #[arg(long)]
        project: Option<String>,

        /// Category: task|workstream|project or t|w|p
        #[arg(long, short, default_value = "task")]
        category: String,

        /// Issue title
        #[arg(long)]
        title: String,

        /// Issue description
        #[arg(long, default_value = "")]
        body: String,

        /// Parent issue id
        #[arg(long, short)]
        parent: Option<String>,

        /// Comma-separated ids this issue depends on
        #[arg(long, value_name = "IDS")]
        blocked_by: Option<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show an issue
    Show {
        /// Issue id
        #[arg(long)]
        id: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List issues, oldest first
    List {
        /// Project prefix (defaults to itconfig project)
        #[arg(long)]
        project: Option<String>,

        /// Only issues in this state
        #[arg(long)]
        state: Option<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Transition an issue to a new state
    State {
        /// Issue id
        #[arg(long)]
        id: String,

        /// Target state: todo|in_progress|blocked|done|canceled
        #[arg(long)]
        to: String,

        /// Fail with a conflict unless the issue is at this version
        #[arg(long, value_name = "N")]
        expected_version: Option<i64>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Set or clear an issue's parent
    #[command(group(ArgGroup::new("target").required(true).args(["parent", "clear"])))]
    Parent {
        /// Issue id
        #[arg(long)]
        id: String,

        /// New parent issue id
        #[arg(long, short)]
        parent: Option<String>,

        /// Remove the parent
        #[arg(long)]
        clear: bool,

        /// Fail with a conflict unless the issue is at this version
        #[arg(long, value_name = "N")]
        expected_version: Option<i64>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace or clear an issue's dependencies
    #[command(group(ArgGroup::new("deps").required(true).args(["set", "clear"])))]
    BlockedBy {
        /// Issue id
        #[arg(long)]
        id: String,

        /// Comma-separated dependency ids
        #[arg(long, value_name = "IDS")]
        set: Option<String>,

        /// Remove all dependencies
        #[arg(long)]
        clear: bool,

        /// Fail with a conflict unless the issue is at this version
        #[arg(long, value_name = "N")]
        expected_version: Option<i64>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the parent hierarchy as a tree
    Tree {
        /// Project prefix (defaults to itconfig project)
        #[arg(long)]
        project: Option<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
