//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the development state
//! file (PETAL_ENV=dev) and verify outputs. Assertions are written to hold
//! regardless of what earlier runs left in that state file.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "petal-cli", "--"])
        .args(args)
        .env("PETAL_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0, "--help failed");
    assert!(stdout.contains("Petal CLI"));
    assert!(stdout.contains("today"));
    assert!(stdout.contains("chores"));
}

#[test]
fn test_goals_show() {
    let (stdout, _, code) = run_cli(&["goals", "show"]);
    assert_eq!(code, 0, "goals show failed");
    let goals: serde_json::Value = serde_json::from_str(&stdout).expect("goals output is JSON");
    assert!(goals["waterMl"].is_number());
    assert!(goals["steps"].is_number());
    assert!(goals["sleepHours"].is_number());
}

#[test]
fn test_today_show() {
    let (stdout, _, code) = run_cli(&["today", "show"]);
    assert_eq!(code, 0, "today show failed");
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("summary is JSON");
    assert!(summary["progress"]["dayClosed"].is_boolean());
    assert!(summary["streaks"]["currentDays"].is_number());
    assert!(summary["streaks"]["bestDays"].is_number());
    assert!(summary["sticker"].is_string());
}

#[test]
fn test_workout_types() {
    let (stdout, _, code) = run_cli(&["workouts", "types"]);
    assert_eq!(code, 0, "workouts types failed");
    let types: serde_json::Value = serde_json::from_str(&stdout).expect("types output is JSON");
    let ids: Vec<&str> = types
        .as_array()
        .expect("types is an array")
        .iter()
        .filter_map(|line| line["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["gym", "fullBody", "legs", "cardio", "rest"]);
}

#[test]
fn test_chore_lifecycle() {
    let title = format!("E2E chore {}", std::process::id());
    let (stdout, _, code) = run_cli(&["chores", "add", &title, "--days", "1,3"]);
    assert_eq!(code, 0, "chores add failed");
    let id = stdout
        .lines()
        .next()
        .and_then(|line| line.strip_prefix("Chore created: "))
        .expect("add prints the new id")
        .to_string();

    let (stdout, _, code) = run_cli(&["chores", "list"]);
    assert_eq!(code, 0, "chores list failed");
    assert!(stdout.contains(&id));
    assert!(stdout.contains(&title));

    // 2024-01-01 is a Monday, which matches the 1,3 schedule
    let (stdout, _, code) = run_cli(&["chores", "toggle", &id, "--date", "2024-01-01"]);
    assert_eq!(code, 0, "chores toggle failed");
    assert!(stdout.contains("marked done"));

    let (stdout, _, code) = run_cli(&["chores", "remove", &id]);
    assert_eq!(code, 0, "chores remove failed");
    assert!(stdout.contains("Chore removed"));
}

#[test]
fn test_invalid_date_key_is_rejected() {
    let (_, stderr, code) = run_cli(&["today", "show", "--date", "2024-02-30"]);
    assert_ne!(code, 0, "impossible date should be rejected");
    assert!(stderr.contains("invalid date key"));
}

#[test]
fn test_month_show() {
    let (stdout, _, code) = run_cli(&["month", "show", "--date", "2024-02-10"]);
    assert_eq!(code, 0, "month show failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("report is JSON");
    assert_eq!(report["month"], "2024-02");
    assert_eq!(report["days"].as_array().expect("days array").len(), 29);
}
