//! # Dayplanner Core Library
//!
//! Business logic for a personal task and daily-schedule manager. Users
//! register, keep a profile of wake/sleep times and routine preferences, add
//! tasks, and ask for a day plan that slots their first pending tasks into a
//! fixed routine template. The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Clock**: string-level wall-clock arithmetic that preserves 12/24-hour notation
//! - **Scheduler**: deterministic day template plus the idempotent per-day planner
//! - **Storage**: SQLite for users, profiles, tasks and schedules; TOML configuration
//!
//! ## Key Components
//!
//! - [`build_schedule`]: pure schedule builder
//! - [`plan_day`]: precondition checks, refusals and first-write-wins caching
//! - [`PlannerDb`] / [`UserScope`]: per-user storage access
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod profile;
pub mod schedule;
pub mod scheduler;
pub mod storage;
pub mod task;

pub use clock::{add_minutes, subtract_minutes, ClockFormat, ClockTime, TimeParseError};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use profile::{SleepSchedule, User, UserProfile};
pub use schedule::{BlockCategory, RefusalKind, ScheduleBlock, ScheduleRefusal, ScheduleResult};
pub use scheduler::{build_schedule, plan_day, PlanOutcome, Preferences, TaskRef};
pub use storage::{Config, EmptyDayPolicy, PlannerDb, StoredSchedule, UserScope};
pub use task::{NewTask, Priority, Task, TaskStatus};
