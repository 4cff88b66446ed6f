// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for state transitions, versions and dependency gating.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use yare::parameterized;

#[test]
fn start_and_finish_a_task() {
    let temp = init_temp();
    let (_, _, task) = hierarchy(&temp);

    it(&temp)
        .args(["state", "--id", &task, "--to", "in_progress"])
        .assert()
        .success()
        .stdout(format!("updated {task} to in_progress (v2)\n"));

    let done = json(&temp, &["state", "--id", &task, "--to", "done"]);
    assert_eq!(done["state"], "done");
    assert_eq!(done["version"], 3);
    assert!(done["closed_at"].is_string());

    let reopened = json(&temp, &["state", "--id", &task, "--to", "todo"]);
    assert!(reopened["closed_at"].is_null());
    assert_eq!(reopened["version"], 4);
}

#[parameterized(
    todo_to_done = { "done" },
    unknown_state = { "finished" },
)]
fn rejected_transition_exits_2(to: &str) {
    let temp = init_temp();
    let (_, _, task) = hierarchy(&temp);
    it(&temp)
        .args(["state", "--id", &task, "--to", to])
        .assert()
        .code(2);
    assert_eq!(version(&temp, &task), 1);
}

#[test]
fn stale_expected_version_exits_4() {
    let temp = init_temp();
    let (_, _, task) = hierarchy(&temp);
    it(&temp)
        .args(["state", "--id", &task, "--to", "blocked", "--expected-version", "1"])
        .assert()
        .success();
    it(&temp)
        .args(["state", "--id", &task, "--to", "todo", "--expected-version", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("conflict"));
    assert_eq!(version(&temp, &task), 2);
}

#[test]
fn same_state_keeps_version() {
    let temp = init_temp();
    let (_, _, task) = hierarchy(&temp);
    let same = json(&temp, &["state", "--id", &task, "--to", "todo"]);
    assert_eq!(same["version"], 1);
}

#[test]
fn unfinished_dependency_gates_in_progress() {
    let temp = init_temp();
    let (_, ws, first) = hierarchy(&temp);
    let second = create(&temp, "t", "Migrate", Some(ws.as_str()));

    it(&temp)
        .args(["blocked-by", "--id", &second, "--set", &first])
        .assert()
        .success()
        .stdout(format!("updated blocked_by for {second} (v2)\n"));

    it(&temp)
        .args(["state", "--id", &second, "--to", "in_progress"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(first.as_str()));

    // blocked is still reachable
    it(&temp)
        .args(["state", "--id", &second, "--to", "blocked"])
        .assert()
        .success();

    for to in ["in_progress", "done"] {
        it(&temp)
            .args(["state", "--id", &first, "--to", to])
            .assert()
            .success();
    }
    it(&temp)
        .args(["state", "--id", &second, "--to", "in_progress"])
        .assert()
        .success();
}

#[test]
fn blocked_by_rejects_self_and_unknown() {
    let temp = init_temp();
    let (_, _, task) = hierarchy(&temp);
    it(&temp)
        .args(["blocked-by", "--id", &task, "--set", &task])
        .assert()
        .code(2);
    it(&temp)
        .args(["blocked-by", "--id", &task, "--set", "cat-999999"])
        .assert()
        .code(3);
}

#[test]
fn blocked_by_clear_empties_list() {
    let temp = init_temp();
    let (project, _, task) = hierarchy(&temp);
    json(&temp, &["blocked-by", "--id", &task, "--set", &project]);
    let cleared = json(&temp, &["blocked-by", "--id", &task, "--clear"]);
    assert_eq!(cleared["blocked_by"], serde_json::json!([]));
    assert_eq!(cleared["version"], 3);
}
