// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `itconfig` discovery and database path precedence.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

#[test]
fn config_project_found_from_subdirectory() {
    let temp = init_temp();
    let nested = temp.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    let issue = json_in(&nested, &temp, &["create", "-c", "p", "--title", "Launch"]);
    assert_eq!(issue["project_prefix"], "cat");
    // Without a db key the default path is relative to the working directory.
    assert!(nested.join(".it/issues.db").is_file());
    assert!(!temp.path().join(".it").exists());
}

#[test]
fn config_db_key_shared_by_subdirectories() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("itconfig"),
        "db=.it/issues.db\nproject=cat\n",
    )
    .unwrap();
    let nested = temp.path().join("a/b");
    std::fs::create_dir_all(&nested).unwrap();

    let created = json_in(&nested, &temp, &["create", "-c", "p", "--title", "Launch"]);
    assert!(temp.path().join(".it/issues.db").is_file());
    assert!(!nested.join(".it").exists());

    let listed = json(&temp, &["list"]);
    assert_eq!(listed[0]["id"], created["id"]);
}

#[test]
fn config_db_is_relative_to_config_file() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("itconfig"),
        "# tracker\ndb = data/it.db\nproject = CAT\n",
    )
    .unwrap();
    let nested = temp.path().join("src");
    std::fs::create_dir_all(&nested).unwrap();

    let issue = json_in(&nested, &temp, &["create", "-c", "p", "--title", "Launch"]);
    assert_eq!(issue["project_prefix"], "cat");
    assert!(temp.path().join("data/it.db").is_file());
}

#[test]
fn db_flag_beats_config() {
    let temp = init_temp();
    let flag_db = temp.path().join("flag.db");
    it(&temp)
        .args(["--db", flag_db.to_str().unwrap()])
        .args(["create", "-c", "p", "--title", "Launch"])
        .assert()
        .success();
    assert!(flag_db.is_file());
    assert!(!temp.path().join(".it").exists());
}

#[test]
fn env_used_without_config_db() {
    let temp = init_temp();
    let env_db = temp.path().join("env.db");
    it(&temp)
        .env("IT_DB_PATH", &env_db)
        .args(["create", "-c", "p", "--title", "Launch"])
        .assert()
        .success();
    assert!(env_db.is_file());
}

#[test]
fn missing_project_exits_2() {
    let temp = TempDir::new().unwrap();
    it(&temp)
        .args(["create", "-c", "p", "--title", "Launch"])
        .assert()
        .code(2);
}

#[test]
fn malformed_config_exits_1() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("itconfig"), "project=cat\ncolor=blue\n").unwrap();
    it(&temp)
        .args(["list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("itconfig:2"));
}

fn json_in(dir: &std::path::Path, temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = it(temp)
        .current_dir(dir)
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}
