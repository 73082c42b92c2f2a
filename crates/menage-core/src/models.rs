use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Recurrence category driving due-date arithmetic.
///
/// Historical data carries two parallel label vocabularies, English and
/// French; both parse into the same canonical variants. `Display` always
/// emits the canonical lowercase English label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Semiannual,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid frequency label: {0}")]
pub struct ParseFrequencyError(String);

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" | "quotidienne" => Ok(Frequency::Daily),
            "weekly" | "hebdomadaire" => Ok(Frequency::Weekly),
            "monthly" | "mensuelle" => Ok(Frequency::Monthly),
            "quarterly" | "trimestrielle" => Ok(Frequency::Quarterly),
            "semiannual" | "semi-annual" | "semestrielle" => Ok(Frequency::Semiannual),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Quarterly => write!(f, "quarterly"),
            Frequency::Semiannual => write!(f, "semiannual"),
        }
    }
}

/// A household chore.
///
/// `next_due` starts unset and is first populated when the chore is marked
/// done; the sweep predicate ignores rows without one.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Location tag used for room-scoped listings.
    pub room: String,
    /// Ordered sub-items, stored as a JSON array column.
    #[sqlx(json)]
    pub what: Vec<String>,
    /// Raw recurrence label. Canonicalised on creation when recognised;
    /// unknown labels are kept verbatim and never advance the schedule.
    pub frequency: String,
    /// Scheduled time-of-day or duration metadata, opaque to the core.
    pub time: Option<String>,
    pub is_done: bool,
    pub date_done: Option<DateTime<Utc>>,
    pub last_completed: Option<DateTime<Utc>>,
    pub next_due: Option<DateTime<Utc>>,
    /// Visible to every user regardless of ownership.
    pub is_global: bool,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            name: String::new(),
            description: None,
            room: String::new(),
            what: Vec::new(),
            frequency: Frequency::Weekly.to_string(),
            time: None,
            is_done: false,
            date_done: None,
            last_completed: None,
            next_due: None,
            is_global: false,
            user_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

/// Data required to create a new chore.
#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub name: String,
    pub description: Option<String>,
    pub room: String,
    pub what: Vec<String>,
    pub frequency: String,
    pub time: Option<String>,
    pub is_global: bool,
    pub user_id: Option<Uuid>,
}

/// Ownership scope of a task listing.
#[derive(Debug, Clone, Copy, Default)]
pub enum Scope {
    /// No ownership constraint.
    #[default]
    Any,
    /// Global tasks only.
    Global,
    /// Tasks owned by one user.
    User(Uuid),
    /// Tasks owned by one user, plus every global task.
    UserOrGlobal(Uuid),
}

/// Filter for [`crate::store::TaskStore::find_tasks`].
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub scope: Scope,
    /// Room membership. `Some(vec![])` is an empty membership test and
    /// matches nothing.
    pub rooms: Option<Vec<String>>,
    pub is_done: Option<bool>,
    /// Upper bound on `next_due`; rows without a due date are excluded.
    pub due_on_or_before: Option<DateTime<Utc>>,
}
