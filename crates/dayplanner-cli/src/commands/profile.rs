//! Planning profile commands.

use clap::{Args, Subcommand};
use dayplanner_core::{Config, PlannerDb, SleepSchedule, UserProfile};

use super::{print_json, with_scope, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile and which planning fields are missing
    Show,
    /// Update profile fields (unspecified fields are left as they are)
    Set(ProfileFields),
}

#[derive(Args)]
pub struct ProfileFields {
    /// Display name
    #[arg(long)]
    name: Option<String>,
    /// Role, e.g. "student" or "professional"
    #[arg(long)]
    role: Option<String>,
    /// Wake time, e.g. "7:00 AM" or "07:00"
    #[arg(long)]
    wake: Option<String>,
    /// Bedtime, e.g. "11:00 PM" or "23:00"
    #[arg(long)]
    bedtime: Option<String>,
    /// Family time range used verbatim, e.g. "6:00 PM - 7:00 PM"
    #[arg(long)]
    family_time: Option<String>,
    /// Workout preference, e.g. "morning" or "evening"
    #[arg(long)]
    workout: Option<String>,
    /// How workouts affect your energy
    #[arg(long)]
    workout_impact: Option<String>,
    /// When your energy peaks
    #[arg(long)]
    peak_energy: Option<String>,
    /// How you prefer to study
    #[arg(long)]
    study_preference: Option<String>,
    /// Main goals, free text
    #[arg(long)]
    goals: Option<String>,
    /// Working/studying days per week
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
    schedule_days: Option<u8>,
    /// Weekly commitment as DAY=TEXT (repeatable), e.g. --day "monday=classes 9-3"
    #[arg(long = "day", value_parser = parse_day)]
    days: Vec<(String, String)>,
}

fn parse_day(s: &str) -> Result<(String, String), String> {
    let (day, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected DAY=TEXT, got '{s}'"))?;
    let day = day.trim().to_lowercase();
    if day.is_empty() {
        return Err("day name must not be empty".into());
    }
    Ok((day, text.trim().to_string()))
}

impl ProfileFields {
    fn apply(self, profile: &mut UserProfile) -> Result<(), String> {
        let set = |slot: &mut Option<String>, value: Option<String>| {
            if let Some(v) = value {
                *slot = Some(v);
            }
        };
        set(&mut profile.name, self.name);
        set(&mut profile.role, self.role);
        set(&mut profile.family_time, self.family_time);
        set(&mut profile.workout_preference, self.workout);
        set(&mut profile.workout_impact, self.workout_impact);
        set(&mut profile.peak_energy, self.peak_energy);
        set(&mut profile.study_preference, self.study_preference);
        set(&mut profile.main_goals, self.goals);
        if let Some(days) = self.schedule_days {
            profile.schedule_days = Some(days);
        }
        for (day, text) in self.days {
            profile.weekly_schedule.insert(day, text);
        }

        let (wake, bedtime) = (self.wake, self.bedtime);
        if wake.is_none() && bedtime.is_none() {
            return Ok(());
        }
        if let Some(sleep) = profile.sleep_schedule.as_mut() {
            if let Some(w) = wake {
                sleep.wake_time = w;
            }
            if let Some(b) = bedtime {
                sleep.bedtime = b;
            }
        } else if let (Some(wake_time), Some(bedtime)) = (wake, bedtime) {
            profile.sleep_schedule = Some(SleepSchedule { wake_time, bedtime });
        } else {
            return Err("set --wake and --bedtime together the first time".into());
        }
        Ok(())
    }
}

pub fn run(action: ProfileAction, user: Option<String>) -> CmdResult {
    let db = PlannerDb::open()?;
    let config = Config::load_or_default();

    with_scope(&db, user, &config, |scope| {
        match action {
            ProfileAction::Show => {
                let profile = scope.profile()?;
                print_json(&serde_json::json!({
                    "profile": profile,
                    "missing": profile.missing_fields(),
                }))?;
            }
            ProfileAction::Set(fields) => {
                let mut profile = scope.profile()?;
                fields.apply(&mut profile)?;
                scope.save_profile(&profile)?;
                print_json(&profile)?;
            }
        }
        Ok(0)
    })
}
