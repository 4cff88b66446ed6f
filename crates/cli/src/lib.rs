// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! itrs - the library behind the `it` issue tracker CLI.
//!
//! Issues form a project → workstream → task hierarchy stored in SQLite.
//! Every mutation bumps a per-issue version, and callers may pass
//! `--expected-version` to get a conflict instead of a lost update.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - the clap argument surface
//! - [`Config`] - the `itconfig` file discovered from the working directory
//! - [`Error`] - CLI errors and their process exit codes
//!
//! Storage, ids and the workflow rules live in `it-core`.

mod cli;
mod commands;
mod display;

pub mod config;
pub mod error;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};

/// Execute a parsed command line. `--db` applies to every command.
pub fn run(cli: Cli) -> Result<()> {
    let db = cli.db.as_deref();
    match cli.command {
        Command::Create {
            project,
            category,
            title,
            body,
            parent,
            blocked_by,
            json,
        } => commands::create::run(
            db,
            project.as_deref(),
            &category,
            &title,
            &body,
            parent.as_deref(),
            blocked_by.as_deref(),
            json,
        ),
        Command::Show { id, json } => commands::show::run(db, &id, json),
        Command::List {
            project,
            state,
            json,
        } => commands::list::run(db, project.as_deref(), state.as_deref(), json),
        Command::State {
            id,
            to,
            expected_version,
            json,
        } => commands::state::run(db, &id, &to, expected_version, json),
        Command::Parent {
            id,
            parent,
            clear,
            expected_version,
            json,
        } => {
            let parent = if clear { None } else { parent.as_deref() };
            commands::parent::run(db, &id, parent, expected_version, json)
        }
        Command::BlockedBy {
            id,
            set,
            clear,
            expected_version,
            json,
        } => {
            let set = if clear { None } else { set.as_deref() };
            commands::blocked_by::run(db, &id, set, expected_version, json)
        }
        Command::Tree { project, json } => commands::tree::run(db, project.as_deref(), json),
    }
}
