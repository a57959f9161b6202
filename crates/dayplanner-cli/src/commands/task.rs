//! Task management commands for CLI.

use clap::Subcommand;
use dayplanner_core::{BlockCategory, Config, NewTask, PlannerDb, Priority, TaskStatus};

use super::{print_json, with_scope, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a pending task
    Add {
        /// What needs doing
        description: String,
        /// Category: health, study, work, break, personal, family, college/work
        #[arg(long = "type", default_value = "work")]
        category: BlockCategory,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Expected duration, free text (e.g. "45 min")
        #[arg(long, default_value = "30 min")]
        duration: String,
        /// Scheduling notes
        #[arg(long)]
        preferences: Option<String>,
    },
    /// List tasks in the order they were added
    List {
        /// Filter by status (pending or completed)
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    /// Mark a pending task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, user: Option<String>) -> CmdResult {
    let db = PlannerDb::open()?;
    let config = Config::load_or_default();

    with_scope(&db, user, &config, |scope| {
        match action {
            TaskAction::Add {
                description,
                category,
                priority,
                duration,
                preferences,
            } => {
                let task = scope.add_task(NewTask {
                    description,
                    priority,
                    duration,
                    category,
                    preferences,
                })?;
                eprintln!("Task created: {}", task.id);
                print_json(&task)?;
            }
            TaskAction::List { status } => {
                print_json(&scope.tasks(status)?)?;
            }
            TaskAction::Complete { id } => {
                let task = scope.complete_task(&id)?;
                print_json(&task)?;
            }
            TaskAction::Delete { id } => {
                scope.delete_task(&id)?;
                println!("Task deleted: {id}");
            }
        }
        Ok(0)
    })
}
