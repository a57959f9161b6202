//! Daily schedule generation.
//!
//! - [`builder`]: the fixed day template filled from anchors, tasks and preferences
//! - [`template`]: the generic day handed out when no tasks exist (template policy)
//! - [`service`]: preconditions, refusals and the per-(user, date) cache

pub mod builder;
pub mod service;
pub mod template;

pub use builder::{build_schedule, Preferences, TaskRef, DAILY_TIPS};
pub use service::{compose_day, plan_day, PlanOutcome};
pub use template::generic_schedule;
