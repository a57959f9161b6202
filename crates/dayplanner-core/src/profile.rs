//! Registered users and their planning profile.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::scheduler::Preferences;

/// A registered account. Identity only; there is no credential layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check username/email shape before the store sees them.
    pub fn validate_registration(username: &str, email: &str) -> Result<(), ValidationError> {
        if username.trim().is_empty() {
            return Err(ValidationError::EmptyField("username"));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidValue {
                field: "username".into(),
                message: "must not contain whitespace".into(),
            });
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::EmptyField("email"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(ValidationError::InvalidValue {
                field: "email".into(),
                message: format!("'{email}' is not an email address"),
            }),
        }
    }
}

/// Wake/bed anchors, stored as clock time strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SleepSchedule {
    pub wake_time: String,
    pub bedtime: String,
}

/// Personal preferences collected during onboarding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: Option<String>,
    /// e.g. "student", "professional"
    #[serde(default)]
    pub role: Option<String>,
    /// Working/studying days per week.
    #[serde(default)]
    pub schedule_days: Option<u8>,
    #[serde(default)]
    pub peak_energy: Option<String>,
    #[serde(default)]
    pub study_preference: Option<String>,
    /// Time range used verbatim for the family block, e.g. "6:00 PM - 7:00 PM".
    #[serde(default)]
    pub family_time: Option<String>,
    #[serde(default)]
    pub workout_preference: Option<String>,
    #[serde(default)]
    pub workout_impact: Option<String>,
    #[serde(default)]
    pub main_goals: Option<String>,
    #[serde(default)]
    pub sleep_schedule: Option<SleepSchedule>,
    /// Day name → free text commitments.
    #[serde(default)]
    pub weekly_schedule: BTreeMap<String, String>,
}

impl UserProfile {
    /// Fields that must be set before a schedule can be generated.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
            missing.push("name");
        }
        if self.sleep_schedule.is_none() {
            missing.push("sleep_schedule");
        }
        missing
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            family_time: non_blank(&self.family_time),
            workout_preference: non_blank(&self.workout_preference),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
