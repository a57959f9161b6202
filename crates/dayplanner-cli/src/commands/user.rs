//! User registration commands.

use clap::Subcommand;
use dayplanner_core::{Config, PlannerDb};

use super::{print_json, resolve_user, CmdResult};

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new user
    Register {
        /// Unique username (no whitespace)
        username: String,
        /// Unique email address
        email: String,
        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
    /// List registered users
    List,
    /// Show the acting user
    Show,
}

pub fn run(action: UserAction, user: Option<String>) -> CmdResult {
    let db = PlannerDb::open()?;

    match action {
        UserAction::Register {
            username,
            email,
            admin,
        } => {
            let user = db.register_user(&username, &email, admin)?;
            print_json(&user)?;
        }
        UserAction::List => {
            print_json(&db.list_users()?)?;
        }
        UserAction::Show => {
            let config = Config::load_or_default();
            let username = resolve_user(user, &config)?;
            let user = db
                .find_user(&username)?
                .ok_or_else(|| format!("user not found: {username}"))?;
            print_json(&user)?;
        }
    }
    Ok(0)
}
