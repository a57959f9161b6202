//! Clock arithmetic, handy for checking how a profile time will be shifted.

use clap::Subcommand;
use dayplanner_core::{add_minutes, subtract_minutes};

use super::CmdResult;

#[derive(Subcommand)]
pub enum ClockAction {
    /// Add minutes to a time ("7:00 AM" or "19:00")
    Add {
        time: String,
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },
    /// Subtract minutes from a time
    Sub {
        time: String,
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },
}

pub fn run(action: ClockAction) -> CmdResult {
    let shifted = match action {
        ClockAction::Add { time, minutes } => add_minutes(&time, minutes),
        ClockAction::Sub { time, minutes } => subtract_minutes(&time, minutes),
    };
    println!("{shifted}");
    Ok(0)
}
