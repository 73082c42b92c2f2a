//! # Menage Core Library
//!
//! Domain library for the menage household chore tracker: recurring chores
//! scoped to rooms, due-date scheduling, owned-or-global visibility and the
//! periodic sweep that advances overdue chores.
//!
//! ## Core Modules
//!
//! - [`clock`]: time as an injected collaborator
//! - [`db`]: database connection and migration management
//! - [`models`]: the task entity, frequency labels and store filters
//! - [`schedule`]: frequency-to-interval due-date arithmetic
//! - [`store`]: task persistence trait and SQLite implementation
//! - [`visibility`]: which tasks a requester may see
//! - [`completion`]: done/undone workflows
//! - [`sweeper`]: periodic due-date advancement
//! - [`error`]: error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use menage_core::clock::SystemClock;
//! use menage_core::completion::CompletionWorkflow;
//! use menage_core::db;
//! use menage_core::models::NewTaskData;
//! use menage_core::store::{SqliteTaskStore, TaskStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), menage_core::error::CoreError> {
//!     let pool = db::establish_connection("chores.db").await?;
//!     let store = Arc::new(SqliteTaskStore::new(pool));
//!
//!     let task = store
//!         .add_task(NewTaskData {
//!             name: "Vacuum the hallway".to_string(),
//!             room: "hallway".to_string(),
//!             frequency: "weekly".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     let workflow = CompletionWorkflow::new(Arc::clone(&store), Arc::new(SystemClock));
//!     let done = workflow.mark_done(task.id).await?;
//!     println!("next due: {:?}", done.next_due);
//!
//!     Ok(())
//! }
//! ```

pub mod clock;
pub mod completion;
pub mod db;
pub mod error;
pub mod models;
pub mod schedule;
pub mod store;
pub mod sweeper;
pub mod visibility;
