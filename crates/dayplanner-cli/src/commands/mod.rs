pub mod clock;
pub mod config;
pub mod profile;
pub mod schedule;
pub mod task;
pub mod user;

use dayplanner_core::{Config, PlannerDb, UserScope};

/// Result of a subcommand: the process exit code on success.
pub type CmdResult = Result<i32, Box<dyn std::error::Error>>;

/// Pick the acting user from `--user`, falling back to `default_user`.
pub fn resolve_user(
    flag: Option<String>,
    config: &Config,
) -> Result<String, Box<dyn std::error::Error>> {
    flag.or_else(|| config.default_user.clone())
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| "no user given: pass --user or run `config set default_user <name>`".into())
}

/// Open the database scoped to the acting user.
pub fn with_scope<T>(
    db: &PlannerDb,
    flag: Option<String>,
    config: &Config,
    f: impl FnOnce(&UserScope<'_>) -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    let username = resolve_user(flag, config)?;
    let scope = db.scope(&username)?;
    f(&scope)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
