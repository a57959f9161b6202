//! Daily schedule builder.
//!
//! Fills a fixed day template from two anchors (wake time and bedtime), the
//! first two pending tasks and the user's family/workout preferences.
//! Pure: no I/O, no clock reads, no failure modes. Unparseable anchors are
//! carried into the time ranges verbatim (see [`crate::clock`]).

use serde::{Deserialize, Serialize};

use crate::clock::{add_minutes, subtract_minutes};
use crate::schedule::{BlockCategory, ScheduleBlock, ScheduleResult};

pub const DEFAULT_FAMILY_TIME: &str = "6:00 PM - 7:00 PM";
pub const DEFAULT_WORKOUT_TIME: &str = "7:00 PM - 8:00 PM";

/// Tips attached to every generated schedule.
pub const DAILY_TIPS: [&str; 3] = [
    "Take 5-min breaks every hour",
    "Stay hydrated",
    "Maintain good posture while working",
];

/// The builder's view of a pending task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRef {
    pub description: String,
    pub category: BlockCategory,
}

impl TaskRef {
    pub fn new(description: impl Into<String>, category: BlockCategory) -> Self {
        Self {
            description: description.into(),
            category,
        }
    }
}

/// Profile preferences that shape the evening of the template.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preferences {
    /// Used verbatim as the family block's time range.
    pub family_time: Option<String>,
    /// Free text such as "morning" or "evening".
    pub workout_preference: Option<String>,
}

/// Build the day's schedule.
///
/// Blocks are appended in template order:
/// morning routine, deep work, break, second work session, lunch,
/// college/work, family time, workout (only with a workout preference),
/// evening review. The family and workout blocks are anchored to
/// preferences, not to the preceding block, and may overlap it.
///
/// # Preconditions
///
/// Callers must not invoke this with an empty `tasks` slice or for a profile
/// without a name and sleep schedule; those cases are turned into refusals
/// by [`crate::scheduler::plan_day`] before this function is reached.
pub fn build_schedule(
    wake_time: &str,
    bedtime: &str,
    tasks: &[TaskRef],
    preferences: &Preferences,
) -> ScheduleResult {
    let mut schedule = Vec::with_capacity(9);

    let routine_end = add_minutes(wake_time, 30);
    schedule.push(ScheduleBlock::new(
        range(wake_time, &routine_end),
        "Morning routine & light stretching",
        "Gentle start, won't tire you out",
        BlockCategory::Health,
    ));

    let deep_start = add_minutes(wake_time, 60);
    let deep_end = add_minutes(&deep_start, 120);
    let first = tasks.first();
    schedule.push(ScheduleBlock::new(
        range(&deep_start, &deep_end),
        first.map_or_else(
            || "Focused work".to_string(),
            |t| format!("Deep work session - {}", t.description),
        ),
        "High energy time for demanding tasks",
        first.map_or(BlockCategory::Work, |t| t.category),
    ));

    let break_end = add_minutes(&deep_end, 15);
    schedule.push(ScheduleBlock::new(
        range(&deep_end, &break_end),
        "Break",
        "Short break to refresh your mind",
        BlockCategory::Break,
    ));

    let second_end = add_minutes(&break_end, 90);
    let second = tasks.get(1);
    schedule.push(ScheduleBlock::new(
        range(&break_end, &second_end),
        second.map_or_else(
            || "Additional tasks".to_string(),
            |t| format!("Work session - {}", t.description),
        ),
        "Continued focus time for complex tasks",
        second.map_or(BlockCategory::Work, |t| t.category),
    ));

    let lunch_start = add_minutes(&second_end, 60);
    let lunch_end = add_minutes(&lunch_start, 60);
    schedule.push(ScheduleBlock::new(
        range(&lunch_start, &lunch_end),
        "Lunch break",
        "Nourishment and rest",
        BlockCategory::Personal,
    ));

    let college_start = add_minutes(&lunch_end, 60);
    let college_end = add_minutes(&college_start, 90);
    schedule.push(ScheduleBlock::new(
        range(&college_start, &college_end),
        "College/Work commitments",
        "Scheduled college/work time",
        BlockCategory::CollegeWork,
    ));

    schedule.push(ScheduleBlock::new(
        given(&preferences.family_time).unwrap_or(DEFAULT_FAMILY_TIME),
        "Family time",
        "Dedicated family time as per your preferences",
        BlockCategory::Family,
    ));

    if let Some(preference) = given(&preferences.workout_preference) {
        let time_range = if preference.to_lowercase().contains("morning") {
            range(&add_minutes(wake_time, 30), &add_minutes(wake_time, 90))
        } else {
            DEFAULT_WORKOUT_TIME.to_string()
        };
        schedule.push(ScheduleBlock::new(
            time_range,
            "Workout session",
            format!("{} workout as per your preferences", capitalize(preference)),
            BlockCategory::Health,
        ));
    }

    schedule.push(ScheduleBlock::new(
        range(&subtract_minutes(bedtime, 60), bedtime),
        "Review and plan for tomorrow",
        "Reflect on the day and prepare for tomorrow",
        BlockCategory::Personal,
    ));

    ScheduleResult {
        schedule,
        daily_summary: format!(
            "Your day runs from {wake_time} to {bedtime}. {} pending {} placed into your \
             peak-energy work blocks around meals, family time and rest.",
            tasks.len(),
            if tasks.len() == 1 { "task" } else { "tasks" },
        ),
        tips: DAILY_TIPS.iter().map(|tip| tip.to_string()).collect(),
    }
}

/// A preference counts only if it has non-whitespace content.
fn given(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn range(start: &str, end: &str) -> String {
    format!("{start} - {end}")
}

/// Upper-case the first character and lower-case the rest ("EVENING" → "Evening").
fn capitalize(word: &str) -> String {
    let word = word.trim();
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
