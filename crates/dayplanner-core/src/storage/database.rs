//! SQLite storage for users, profiles, tasks and generated schedules.
//!
//! Every per-user operation goes through a [`UserScope`], obtained from
//! [`PlannerDb::scope`] for a registered username. There is no global
//! state: callers open the database, scope it, do their work, drop it.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError, Result};
use crate::profile::{User, UserProfile};
use crate::schedule::{BlockCategory, ScheduleResult};
use crate::task::{NewTask, Priority, Task, TaskStatus};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A schedule persisted for one (user, date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSchedule {
    pub user_id: String,
    pub date: NaiveDate,
    pub result: ScheduleResult,
    pub created_at: DateTime<Utc>,
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Map a stored text column into a typed enum, failing the row on junk.
fn parse_column<T: std::str::FromStr>(idx: usize, value: String) -> rusqlite::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let created_at: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        is_admin: row.get(3)?,
        created_at: parse_datetime_fallback(&created_at),
    })
}

const TASK_COLUMNS: &str = "id, user_id, description, priority, duration, category, preferences, status, added_at, completed_at";

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    let added_at: String = row.get(8)?;
    let completed_at: Option<String> = row.get(9)?;
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        description: row.get(2)?,
        priority: parse_column::<Priority>(3, row.get(3)?)?,
        duration: row.get(4)?,
        category: parse_column::<BlockCategory>(5, row.get(5)?)?,
        preferences: row.get(6)?,
        status: parse_column::<TaskStatus>(7, row.get(7)?)?,
        added_at: parse_datetime_fallback(&added_at),
        completed_at: completed_at.as_deref().map(parse_datetime_fallback),
    })
}

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite database for planner storage.
pub struct PlannerDb {
    conn: Connection,
}

impl PlannerDb {
    /// Open the database at `<data_dir>/dayplanner.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("dayplanner.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::init(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        // Concurrent writers wait for the lock instead of failing with `Locked`.
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Register a new user.
    ///
    /// # Errors
    /// Validation errors for malformed input, `Duplicate` if the username or
    /// email is taken.
    pub fn register_user(&self, username: &str, email: &str, is_admin: bool) -> Result<User> {
        User::validate_registration(username, email)?;
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            is_admin,
            created_at: Utc::now(),
        };
        self.conn.execute(
            "INSERT INTO users (id, username, email, is_admin, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                user.id,
                user.username,
                user.email,
                user.is_admin,
                user.created_at.to_rfc3339(),
            ],
        )?;
        tracing::info!(username = %user.username, "user registered");
        Ok(user)
    }

    pub fn find_user(&self, username: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, username, email, is_admin, created_at FROM users WHERE username = ?1",
                params![username.trim()],
                row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, email, is_admin, created_at FROM users ORDER BY created_at, username",
        )?;
        let users = stmt
            .query_map([], row_to_user)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    /// Bind the store to one registered user.
    ///
    /// # Errors
    /// `NotFound` if no user has this username.
    pub fn scope(&self, username: &str) -> Result<UserScope<'_>> {
        let user = self.find_user(username)?.ok_or_else(|| CoreError::NotFound {
            kind: "user",
            id: username.to_string(),
        })?;
        Ok(UserScope { db: self, user })
    }
}

/// Store access restricted to a single user's records.
pub struct UserScope<'a> {
    db: &'a PlannerDb,
    user: User,
}

impl UserScope<'_> {
    pub fn user(&self) -> &User {
        &self.user
    }

    fn conn(&self) -> &Connection {
        &self.db.conn
    }

    /// The user's profile, or an empty one if never saved.
    pub fn profile(&self) -> Result<UserProfile> {
        let data: Option<String> = self
            .conn()
            .query_row(
                "SELECT data FROM profiles WHERE user_id = ?1",
                params![self.user.id],
                |row| row.get(0),
            )
            .optional()?;
        match data {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(UserProfile::default()),
        }
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<()> {
        self.conn().execute(
            "INSERT INTO profiles (user_id, data, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at",
            params![
                self.user.id,
                serde_json::to_string(profile)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn add_task(&self, new: NewTask) -> Result<Task> {
        new.validate()?;
        let task = Task::from_new(&self.user.id, new, Utc::now());
        self.conn().execute(
            "INSERT INTO tasks (id, user_id, description, priority, duration, category,
                                preferences, status, added_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                task.id,
                task.user_id,
                task.description,
                task.priority.as_str(),
                task.duration,
                task.category.as_str(),
                task.preferences,
                task.status.as_str(),
                task.added_at.to_rfc3339(),
                task.completed_at.map(|t| t.to_rfc3339()),
            ],
        )?;
        Ok(task)
    }

    /// Tasks in insertion order, optionally filtered by status.
    pub fn tasks(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE user_id = ?1 AND (?2 IS NULL OR status = ?2)
             ORDER BY rowid"
        ))?;
        let tasks = stmt
            .query_map(params![self.user.id, status.map(|s| s.as_str())], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    pub fn pending_tasks(&self) -> Result<Vec<Task>> {
        self.tasks(Some(TaskStatus::Pending))
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let task = self
            .conn()
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 AND id = ?2"),
                params![self.user.id, id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    /// Mark a pending task completed.
    pub fn complete_task(&self, id: &str) -> Result<Task> {
        let mut task = self.get_task(id)?.ok_or_else(|| CoreError::NotFound {
            kind: "task",
            id: id.to_string(),
        })?;
        task.complete(Utc::now())?;
        self.conn().execute(
            "UPDATE tasks SET status = ?1, completed_at = ?2 WHERE user_id = ?3 AND id = ?4",
            params![
                task.status.as_str(),
                task.completed_at.map(|t| t.to_rfc3339()),
                self.user.id,
                task.id,
            ],
        )?;
        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> Result<()> {
        let removed = self.conn().execute(
            "DELETE FROM tasks WHERE user_id = ?1 AND id = ?2",
            params![self.user.id, id],
        )?;
        if removed == 0 {
            return Err(CoreError::NotFound {
                kind: "task",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn schedule_for(&self, date: NaiveDate) -> Result<Option<StoredSchedule>> {
        let row = self
            .conn()
            .query_row(
                "SELECT data, created_at FROM schedules WHERE user_id = ?1 AND date = ?2",
                params![self.user.id, date.format(DATE_FORMAT).to_string()],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        row.map(|(data, created_at)| -> Result<StoredSchedule> {
            Ok(StoredSchedule {
                user_id: self.user.id.clone(),
                date,
                result: serde_json::from_str(&data)?,
                created_at: parse_datetime_fallback(&created_at),
            })
        })
        .transpose()
    }

    /// Persist a schedule unless one already exists for the date.
    ///
    /// First write wins: the returned record is whatever is stored after the
    /// insert, which may come from a concurrent writer.
    pub fn store_schedule_if_absent(
        &self,
        date: NaiveDate,
        result: &ScheduleResult,
    ) -> Result<StoredSchedule> {
        let inserted = self.conn().execute(
            "INSERT OR IGNORE INTO schedules (user_id, date, data, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                self.user.id,
                date.format(DATE_FORMAT).to_string(),
                serde_json::to_string(result)?,
                Utc::now().to_rfc3339(),
            ],
        )?;
        if inserted == 0 {
            tracing::debug!(%date, "schedule already stored, keeping existing record");
        }
        self.schedule_for(date)?.ok_or_else(|| {
            DatabaseError::QueryFailed(format!("schedule for {date} vanished after insert")).into()
        })
    }

    /// Most recent stored schedules first.
    pub fn schedule_history(&self, limit: usize) -> Result<Vec<StoredSchedule>> {
        let mut stmt = self.conn().prepare(
            "SELECT date, data, created_at FROM schedules
             WHERE user_id = ?1 ORDER BY date DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![self.user.id, limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(date, data, created_at)| -> Result<StoredSchedule> {
                let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
                    .map_err(|e| DatabaseError::QueryFailed(format!("bad stored date {date}: {e}")))?;
                Ok(StoredSchedule {
                    user_id: self.user.id.clone(),
                    date,
                    result: serde_json::from_str(&data)?,
                    created_at: parse_datetime_fallback(&created_at),
                })
            })
            .collect()
    }
}
