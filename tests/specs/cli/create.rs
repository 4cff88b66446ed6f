// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `it create` and `it show`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use yare::parameterized;

#[test]
fn create_prints_id_and_version() {
    let temp = init_temp();
    it(&temp)
        .args(["create", "-c", "p", "--title", "Launch"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^created cat-\d{6} \(v1\)\n$").unwrap());
}

#[test]
fn default_database_lives_under_dot_it() {
    let temp = init_temp();
    create(&temp, "project", "Launch", None);
    assert!(temp.path().join(".it/issues.db").is_file());
}

#[test]
fn created_issue_json_shape() {
    let temp = init_temp();
    let issue = json(
        &temp,
        &["create", "-c", "p", "--title", "Launch", "--body", "Q3 goal"],
    );
    assert_eq!(issue["project_prefix"], "cat");
    assert_eq!(issue["category"], "project");
    assert_eq!(issue["state"], "todo");
    assert_eq!(issue["version"], 1);
    assert_eq!(issue["body"], "Q3 goal");
    assert_eq!(issue["blocked_by"], serde_json::json!([]));
    assert!(issue["parent_id"].is_null());
    assert!(issue["closed_at"].is_null());
}

#[test]
fn show_text_lists_fields() {
    let temp = init_temp();
    let (_, ws, task) = hierarchy(&temp);
    it(&temp)
        .args(["show", "--id", &task])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("id: {task}")))
        .stdout(predicate::str::contains("category: task"))
        .stdout(predicate::str::contains(format!("parent: {ws}")))
        .stdout(predicate::str::contains("title: Schema"));
}

#[parameterized(
    bad_category = { &["create", "-c", "epic", "--title", "x"] },
    blank_title = { &["create", "-c", "p", "--title", "  "] },
    task_without_parent = { &["create", "--title", "orphan"] },
    project_with_parent = { &["create", "-c", "p", "--title", "x", "-p", "cat-100000"] },
    bad_prefix = { &["create", "-c", "p", "--project", "toolong", "--title", "x"] },
    missing_title = { &["create", "-c", "p"] },
)]
fn invalid_create_exits_2(args: &[&str]) {
    let temp = init_temp();
    it(&temp).args(args).assert().code(2);
}

#[test]
fn missing_parent_exits_3() {
    let temp = init_temp();
    it(&temp)
        .args(["create", "-c", "w", "--title", "x", "-p", "cat-999999"])
        .assert()
        .code(3)
        .stderr(predicate::str::starts_with("error:"));
}

#[test]
fn wrong_parent_category_exits_2() {
    let temp = init_temp();
    let project = create(&temp, "p", "Launch", None);
    it(&temp)
        .args(["create", "--title", "x", "-p", &project])
        .assert()
        .code(2);
}

#[test]
fn show_missing_issue_exits_3() {
    let temp = init_temp();
    it(&temp)
        .args(["show", "--id", "cat-123456"])
        .assert()
        .code(3);
}

#[test]
fn list_filters_by_state_in_creation_order() {
    let temp = init_temp();
    let (project, ws, task) = hierarchy(&temp);
    it(&temp)
        .args(["state", "--id", &task, "--to", "blocked"])
        .assert()
        .success();

    let all = json(&temp, &["list"]);
    let ids: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, [project.as_str(), ws.as_str(), task.as_str()]);

    let blocked = json(&temp, &["list", "--state", "blocked"]);
    assert_eq!(blocked.as_array().unwrap().len(), 1);
    assert_eq!(blocked[0]["id"], task.as_str());
}

#[test]
fn list_other_project_is_empty() {
    let temp = init_temp();
    hierarchy(&temp);
    let other = json(&temp, &["list", "--project", "dog"]);
    assert_eq!(other, serde_json::json!([]));
}

#[test]
fn list_malformed_project_is_empty() {
    let temp = init_temp();
    hierarchy(&temp);
    let listed = json(&temp, &["list", "--project", "ab"]);
    assert_eq!(listed, serde_json::json!([]));
}
