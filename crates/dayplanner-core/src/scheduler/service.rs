//! Per-day planning: precondition checks, builder dispatch, idempotent storage.

use chrono::NaiveDate;
use serde::Serialize;

use super::builder::build_schedule;
use super::template::generic_schedule;
use crate::error::Result;
use crate::profile::UserProfile;
use crate::schedule::{ScheduleRefusal, ScheduleResult};
use crate::storage::{EmptyDayPolicy, UserScope};
use crate::task::Task;

/// What a planning request produced.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// A schedule for the day; `cached` when it was already stored.
    Ready {
        result: ScheduleResult,
        cached: bool,
    },
    /// Preconditions not met; nothing was stored.
    Refused(ScheduleRefusal),
}

/// Decide what the day looks like from a profile and its pending tasks.
///
/// Pure; the storage-facing wrapper is [`plan_day`].
pub fn compose_day(
    profile: &UserProfile,
    pending: &[Task],
    policy: EmptyDayPolicy,
) -> std::result::Result<ScheduleResult, ScheduleRefusal> {
    let missing = profile.missing_fields();
    let sleep = match &profile.sleep_schedule {
        Some(sleep) if missing.is_empty() => sleep,
        _ => return Err(ScheduleRefusal::profile_incomplete(&missing)),
    };

    if pending.is_empty() {
        return match policy {
            EmptyDayPolicy::Refuse => Err(ScheduleRefusal::no_tasks()),
            EmptyDayPolicy::Template => Ok(generic_schedule()),
        };
    }

    let tasks: Vec<_> = pending.iter().map(Task::to_ref).collect();
    Ok(build_schedule(
        &sleep.wake_time,
        &sleep.bedtime,
        &tasks,
        &profile.preferences(),
    ))
}

/// Return the user's schedule for `date`, generating and storing it on first
/// request.
///
/// A stored schedule is returned as-is, even if the profile or tasks changed
/// since. Refusals are never stored.
pub fn plan_day(scope: &UserScope<'_>, date: NaiveDate, policy: EmptyDayPolicy) -> Result<PlanOutcome> {
    let username = scope.user().username.as_str();

    if let Some(stored) = scope.schedule_for(date)? {
        tracing::debug!(user = username, %date, "returning stored schedule");
        return Ok(PlanOutcome::Ready {
            result: stored.result,
            cached: true,
        });
    }

    let profile = scope.profile()?;
    let pending = scope.pending_tasks()?;

    match compose_day(&profile, &pending, policy) {
        Ok(result) => {
            let stored = scope.store_schedule_if_absent(date, &result)?;
            tracing::info!(
                user = username,
                %date,
                blocks = stored.result.schedule.len(),
                pending = pending.len(),
                "schedule generated"
            );
            Ok(PlanOutcome::Ready {
                result: stored.result,
                cached: false,
            })
        }
        Err(refusal) => {
            tracing::info!(user = username, %date, kind = ?refusal.kind, "schedule refused");
            Ok(PlanOutcome::Refused(refusal))
        }
    }
}
