// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// `it` running inside `temp`, isolated from the caller's environment.
pub fn it(temp: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("it").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("IT_DB_PATH")
        .env_remove("IT_LOG");
    cmd
}

/// Temp directory with an `itconfig` selecting project `cat`.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("itconfig"), "project=cat\n").unwrap();
    temp
}

/// Run `it <args> --json` and parse stdout.
pub fn json(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = it(temp).args(args).arg("--json").output().unwrap();
    assert!(
        output.status.success(),
        "it {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

/// Create an issue and return its id.
pub fn create(temp: &TempDir, category: &str, title: &str, parent: Option<&str>) -> String {
    let mut args = vec!["create", "-c", category, "--title", title];
    if let Some(parent) = parent {
        args.extend(["-p", parent]);
    }
    json(temp, &args)["id"].as_str().unwrap().to_string()
}

/// Create a project, workstream and task; returns their ids.
pub fn hierarchy(temp: &TempDir) -> (String, String, String) {
    let project = create(temp, "p", "Launch", None);
    let ws = create(temp, "w", "Backend", Some(project.as_str()));
    let task = create(temp, "t", "Schema", Some(ws.as_str()));
    (project, ws, task)
}

pub fn version(temp: &TempDir, id: &str) -> i64 {
    json(temp, &["show", "--id", id])["version"].as_i64().unwrap()
}
