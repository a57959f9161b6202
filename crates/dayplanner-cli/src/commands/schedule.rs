use chrono::{Local, NaiveDate};
use clap::Subcommand;
use dayplanner_core::{plan_day, Config, PlanOutcome, PlannerDb};

use super::{print_json, with_scope, CmdResult};

/// Exit code when the planner refuses (incomplete profile, no tasks).
const REFUSED_EXIT_CODE: i32 = 2;

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Generate the schedule for a day (returns the stored one if it exists)
    Generate {
        /// Calendar date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the stored schedule for a day without generating
    Show {
        /// Calendar date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List recently stored schedules, newest first
    History {
        /// Maximum number of days (default: config planner.history_limit)
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn run(action: ScheduleAction, user: Option<String>) -> CmdResult {
    let db = PlannerDb::open()?;
    let config = Config::load_or_default();

    with_scope(&db, user, &config, |scope| match action {
        ScheduleAction::Generate { date } => {
            let outcome = plan_day(scope, date.unwrap_or_else(today), config.planner.empty_day_policy)?;
            match outcome {
                PlanOutcome::Ready { result, .. } => {
                    print_json(&result)?;
                    Ok(0)
                }
                PlanOutcome::Refused(refusal) => {
                    print_json(&refusal)?;
                    eprintln!("{refusal}");
                    Ok(REFUSED_EXIT_CODE)
                }
            }
        }
        ScheduleAction::Show { date } => {
            let date = date.unwrap_or_else(today);
            match scope.schedule_for(date)? {
                Some(stored) => {
                    print_json(&stored.result)?;
                    Ok(0)
                }
                None => {
                    eprintln!("No schedule stored for {date}");
                    Ok(1)
                }
            }
        }
        ScheduleAction::History { limit } => {
            let history = scope.schedule_history(limit.unwrap_or(config.planner.history_limit))?;
            print_json(&history)?;
            Ok(0)
        }
    })
}
