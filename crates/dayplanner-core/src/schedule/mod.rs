//! Schedule record types.
//!
//! These are the exact shapes persisted per (user, date) and handed back to
//! callers: [`ScheduleResult`] on success, [`ScheduleRefusal`] when the
//! planning preconditions are not met.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Category tag of a schedule block or task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    #[serde(rename = "health")]
    Health,
    #[serde(rename = "study")]
    Study,
    #[serde(rename = "work")]
    Work,
    #[serde(rename = "break")]
    Break,
    #[serde(rename = "personal")]
    Personal,
    #[serde(rename = "family")]
    Family,
    #[serde(rename = "college/work")]
    CollegeWork,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 7] = [
        BlockCategory::Health,
        BlockCategory::Study,
        BlockCategory::Work,
        BlockCategory::Break,
        BlockCategory::Personal,
        BlockCategory::Family,
        BlockCategory::CollegeWork,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Health => "health",
            BlockCategory::Study => "study",
            BlockCategory::Work => "work",
            BlockCategory::Break => "break",
            BlockCategory::Personal => "personal",
            BlockCategory::Family => "family",
            BlockCategory::CollegeWork => "college/work",
        }
    }
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        BlockCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "type".into(),
                message: format!(
                    "'{s}' is not one of: {}",
                    BlockCategory::ALL.map(|c| c.as_str()).join(", ")
                ),
            })
    }
}

/// One slot of a generated day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleBlock {
    /// "<start> - <end>"
    #[serde(rename = "time")]
    pub time_range: String,
    pub task: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub category: BlockCategory,
}

impl ScheduleBlock {
    pub fn new(
        time_range: impl Into<String>,
        task: impl Into<String>,
        reason: impl Into<String>,
        category: BlockCategory,
    ) -> Self {
        Self {
            time_range: time_range.into(),
            task: task.into(),
            reason: reason.into(),
            category,
        }
    }

    /// End of the range, if it has the "<start> - <end>" shape.
    pub fn end(&self) -> Option<&str> {
        self.time_range.split_once(" - ").map(|(_, end)| end)
    }
}

/// A complete generated day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleResult {
    pub schedule: Vec<ScheduleBlock>,
    pub daily_summary: String,
    pub tips: Vec<String>,
}

/// Why a schedule was not generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RefusalKind {
    ProfileIncomplete,
    NoTasks,
}

/// Structured refusal returned instead of a [`ScheduleResult`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleRefusal {
    pub kind: RefusalKind,
    pub message: String,
}

impl ScheduleRefusal {
    pub fn profile_incomplete(missing: &[&str]) -> Self {
        Self {
            kind: RefusalKind::ProfileIncomplete,
            message: format!(
                "Please complete your profile before generating a schedule (missing: {}).",
                missing.join(", ")
            ),
        }
    }

    pub fn no_tasks() -> Self {
        Self {
            kind: RefusalKind::NoTasks,
            message: "You have no pending tasks. Add some tasks first, then generate your schedule."
                .to_string(),
        }
    }
}

impl fmt::Display for ScheduleRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_serializes_with_persisted_field_names() {
        let block = ScheduleBlock::new(
            "1:00 PM - 2:00 PM",
            "Lunch break",
            "Nourishment and rest",
            BlockCategory::Personal,
        );
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["time"], "1:00 PM - 2:00 PM");
        assert_eq!(json["type"], "personal");
        assert!(json.get("time_range").is_none());
    }

    #[test]
    fn college_work_uses_slash_tag() {
        let json = serde_json::to_string(&BlockCategory::CollegeWork).unwrap();
        assert_eq!(json, "\"college/work\"");
        assert_eq!(
            " College/Work ".parse::<BlockCategory>().unwrap(),
            BlockCategory::CollegeWork
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!("chores".parse::<BlockCategory>().is_err());
    }

    #[test]
    fn refusal_kind_tags() {
        let refusal = ScheduleRefusal::no_tasks();
        let json = serde_json::to_value(&refusal).unwrap();
        assert_eq!(json["kind"], "no_tasks");

        let refusal = ScheduleRefusal::profile_incomplete(&["name"]);
        let json = serde_json::to_value(&refusal).unwrap();
        assert_eq!(json["kind"], "profile_incomplete");
        assert!(refusal.message.contains("name"));
    }

    #[test]
    fn block_end_reads_the_range_tail() {
        let block = ScheduleBlock::new("7:00 AM - 7:30 AM", "x", "y", BlockCategory::Health);
        assert_eq!(block.end(), Some("7:30 AM"));
        let odd = ScheduleBlock::new("whenever", "x", "y", BlockCategory::Health);
        assert_eq!(odd.end(), None);
    }
}
