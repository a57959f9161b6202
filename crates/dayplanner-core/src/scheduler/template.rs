//! Generic day used by the `template` empty-day policy.
//!
//! Nothing here depends on the user's profile or tasks.

use crate::schedule::{BlockCategory, ScheduleBlock, ScheduleResult};

use super::builder::DAILY_TIPS;

const GENERIC_DAY: [(&str, &str, &str, BlockCategory); 9] = [
    (
        "7:00 AM - 7:30 AM",
        "Morning routine & light stretching",
        "Gentle start, won't tire you out",
        BlockCategory::Health,
    ),
    (
        "8:00 AM - 10:00 AM",
        "Deep work session - Coding practice",
        "High energy time for demanding tasks",
        BlockCategory::Study,
    ),
    (
        "10:00 AM - 10:15 AM",
        "Break",
        "Short break to refresh your mind",
        BlockCategory::Break,
    ),
    (
        "10:15 AM - 12:00 PM",
        "Project work",
        "Continued focus time for complex tasks",
        BlockCategory::Work,
    ),
    (
        "1:00 PM - 2:00 PM",
        "Lunch break",
        "Nourishment and rest",
        BlockCategory::Personal,
    ),
    (
        "2:00 PM - 3:30 PM",
        "College/Work commitments",
        "Scheduled college/work time",
        BlockCategory::CollegeWork,
    ),
    (
        "4:00 PM - 5:00 PM",
        "Family time",
        "Dedicated family time as per your preferences",
        BlockCategory::Family,
    ),
    (
        "6:00 PM - 7:00 PM",
        "Workout session",
        "Evening workout as per your preferences",
        BlockCategory::Health,
    ),
    (
        "8:00 PM - 9:00 PM",
        "Review and plan for tomorrow",
        "Reflect on the day and prepare for tomorrow",
        BlockCategory::Personal,
    ),
];

/// The fixed nine-block day.
pub fn generic_schedule() -> ScheduleResult {
    ScheduleResult {
        schedule: GENERIC_DAY
            .iter()
            .map(|&(time, task, reason, category)| ScheduleBlock::new(time, task, reason, category))
            .collect(),
        daily_summary: "Balanced day with study, work, health, and family time. \
                        High-energy tasks scheduled during peak hours."
            .to_string(),
        tips: DAILY_TIPS.iter().map(|tip| tip.to_string()).collect(),
    }
}
