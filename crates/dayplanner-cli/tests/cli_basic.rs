//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::process::Command;

use tempfile::TempDir;

struct Cli {
    data_dir: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().expect("create temp data dir"),
        }
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_dayplanner"))
            .args(args)
            .env("DAYPLANNER_DATA_DIR", self.data_dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }

    fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "command {args:?} failed: {stderr}");
        serde_json::from_str(&stdout).expect("stdout is JSON")
    }

    fn with_user(&self) -> &Self {
        self.run_json(&["user", "register", "asha", "asha@example.com"]);
        self
    }
}

#[test]
fn test_clock_add_and_sub() {
    let cli = Cli::new();
    let (stdout, _, code) = cli.run(&["clock", "add", "11:45 PM", "30"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "12:15 AM");

    let (stdout, _, _) = cli.run(&["clock", "sub", "12:05 AM", "10"]);
    assert_eq!(stdout.trim(), "11:55 PM");

    let (stdout, _, _) = cli.run(&["clock", "add", "not-a-time", "15"]);
    assert_eq!(stdout.trim(), "not-a-time");
}

#[test]
fn test_user_register_and_list() {
    let cli = Cli::new();
    let user = cli.run_json(&["user", "register", "asha", "asha@example.com"]);
    assert_eq!(user["username"], "asha");

    let users = cli.run_json(&["user", "list"]);
    assert_eq!(users.as_array().unwrap().len(), 1);

    let (_, stderr, code) = cli.run(&["user", "register", "asha", "asha@example.com"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_commands_require_a_user() {
    let cli = Cli::new();
    let (_, stderr, code) = cli.run(&["task", "list"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--user"));
}

#[test]
fn test_task_add_list_complete() {
    let cli = Cli::new();
    cli.with_user();

    let task = cli.run_json(&["--user", "asha", "task", "add", "Write report", "--type", "work"]);
    let id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["status"], "pending");

    let pending = cli.run_json(&["--user", "asha", "task", "list", "--status", "pending"]);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let done = cli.run_json(&["--user", "asha", "task", "complete", &id]);
    assert_eq!(done["status"], "completed");

    let pending = cli.run_json(&["--user", "asha", "task", "list", "--status", "pending"]);
    assert!(pending.as_array().unwrap().is_empty());
}

#[test]
fn test_schedule_refused_for_incomplete_profile() {
    let cli = Cli::new();
    cli.with_user();
    cli.run_json(&["--user", "asha", "task", "add", "Write report"]);

    let (stdout, _, code) = cli.run(&["--user", "asha", "schedule", "generate", "--date", "2026-10-19"]);
    assert_eq!(code, 2);
    let refusal: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(refusal["kind"], "profile_incomplete");
}

#[test]
fn test_schedule_generate_and_show() {
    let cli = Cli::new();
    cli.with_user();
    cli.run_json(&[
        "--user", "asha", "profile", "set", "--name", "Asha", "--wake", "7:00 AM", "--bedtime",
        "11:00 PM",
    ]);

    let (stdout, _, code) = cli.run(&["--user", "asha", "schedule", "generate", "--date", "2026-10-19"]);
    assert_eq!(code, 2);
    let refusal: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(refusal["kind"], "no_tasks");

    cli.run_json(&["--user", "asha", "task", "add", "Write report", "--type", "work"]);
    cli.run_json(&["--user", "asha", "task", "add", "Study math", "--type", "study"]);

    let schedule = cli.run_json(&["--user", "asha", "schedule", "generate", "--date", "2026-10-19"]);
    let blocks = schedule["schedule"].as_array().unwrap();
    assert_eq!(blocks.len(), 8);
    assert_eq!(blocks[7]["time"], "10:00 PM - 11:00 PM");

    let shown = cli.run_json(&["--user", "asha", "schedule", "show", "--date", "2026-10-19"]);
    assert_eq!(shown, schedule);
}

#[test]
fn test_config_default_user_and_policy() {
    let cli = Cli::new();
    cli.with_user();

    let (_, _, code) = cli.run(&["config", "set", "default_user", "asha"]);
    assert_eq!(code, 0);
    let (_, _, code) = cli.run(&["config", "set", "planner.empty_day_policy", "template"]);
    assert_eq!(code, 0);

    let (stdout, _, code) = cli.run(&["config", "get", "planner.empty_day_policy"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "template");

    cli.run_json(&["profile", "set", "--name", "Asha", "--wake", "06:30", "--bedtime", "22:30"]);
    let schedule = cli.run_json(&["schedule", "generate", "--date", "2026-10-20"]);
    assert_eq!(schedule["schedule"].as_array().unwrap().len(), 9);

    let (_, _, code) = cli.run(&["config", "get", "planner.nope"]);
    assert_eq!(code, 1);
}
