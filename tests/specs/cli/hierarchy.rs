// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `it parent` and `it tree`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;

#[test]
fn tree_indents_children() {
    let temp = init_temp();
    let (project, ws, task) = hierarchy(&temp);
    it(&temp)
        .args(["tree"])
        .assert()
        .success()
        .stdout(format!(
            "- {project} (project) [todo] v1 Launch\n  \
             - {ws} (workstream) [todo] v1 Backend\n    \
             - {task} (task) [todo] v1 Schema\n"
        ));
}

#[test]
fn tree_json_nests_issues() {
    let temp = init_temp();
    let (project, ws, task) = hierarchy(&temp);
    let forest = json(&temp, &["tree"]);
    assert_eq!(forest[0]["issue"]["id"], project.as_str());
    assert_eq!(forest[0]["children"][0]["issue"]["id"], ws.as_str());
    assert_eq!(
        forest[0]["children"][0]["children"][0]["issue"]["id"],
        task.as_str()
    );
}

#[test]
fn reparent_task() {
    let temp = init_temp();
    let (project, _, task) = hierarchy(&temp);
    let other = create(&temp, "w", "Frontend", Some(project.as_str()));

    it(&temp)
        .args(["parent", "--id", &task, "-p", &other, "--expected-version", "1"])
        .assert()
        .success()
        .stdout(format!("set parent of {task} to {other} (v2)\n"));
}

#[test]
fn parent_must_match_category() {
    let temp = init_temp();
    let (project, _, task) = hierarchy(&temp);
    it(&temp)
        .args(["parent", "--id", &task, "-p", &project])
        .assert()
        .code(2);
    it(&temp)
        .args(["parent", "--id", &task, "--clear"])
        .assert()
        .code(2);
}

#[test]
fn parent_stale_version_exits_4() {
    let temp = init_temp();
    let (_, ws, task) = hierarchy(&temp);
    it(&temp)
        .args(["parent", "--id", &task, "-p", &ws, "--expected-version", "7"])
        .assert()
        .code(4);
}

#[test]
fn parent_needs_exactly_one_target() {
    let temp = init_temp();
    let (_, ws, task) = hierarchy(&temp);
    it(&temp).args(["parent", "--id", &task]).assert().code(2);
    it(&temp)
        .args(["parent", "--id", &task, "-p", &ws, "--clear"])
        .assert()
        .code(2);
}

#[test]
fn parent_in_other_project_rejected() {
    let temp = init_temp();
    let (_, _, task) = hierarchy(&temp);
    let dog = json(
        &temp,
        &["create", "--project", "dog", "-c", "p", "--title", "Dog"],
    )["id"]
        .as_str()
        .unwrap()
        .to_string();
    let dog_ws = create_in(&temp, "dog", &dog);
    it(&temp)
        .args(["parent", "--id", &task, "-p", &dog_ws])
        .assert()
        .code(2);
}

fn create_in(temp: &TempDir, project: &str, parent: &str) -> String {
    json(
        temp,
        &[
            "create", "--project", project, "-c", "w", "--title", "Kennel", "-p", parent,
        ],
    )["id"]
        .as_str()
        .unwrap()
        .to_string()
}
