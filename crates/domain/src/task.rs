use crate::shared::entity::{Entity, ID};
use crate::tag::Tag;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Casa,
    Trabalho,
    Lazer,
    Saude,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Casa => "casa",
            Self::Trabalho => "trabalho",
            Self::Lazer => "lazer",
            Self::Saude => "saude",
        }
    }
}

impl Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid task type: {0}. Must be one of: casa, trabalho, lazer, saude")]
pub struct InvalidTaskTypeError(String);

impl FromStr for TaskType {
    type Err = InvalidTaskTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casa" => Ok(Self::Casa),
            "trabalho" => Ok(Self::Trabalho),
            "lazer" => Ok(Self::Lazer),
            "saude" => Ok(Self::Saude),
            _ => Err(InvalidTaskTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Baixa,
    Media,
    Alta,
    Urgente,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baixa => "baixa",
            Self::Media => "media",
            Self::Alta => "alta",
            Self::Urgente => "urgente",
        }
    }

    /// Ordering weight used when sorting tasks by priority
    pub fn rank(&self) -> i32 {
        match self {
            Self::Baixa => 0,
            Self::Media => 1,
            Self::Alta => 2,
            Self::Urgente => 3,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Media
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("Invalid priority: {0}. Must be one of: baixa, media, alta, urgente")]
pub struct InvalidPriorityError(String);

impl FromStr for Priority {
    type Err = InvalidPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baixa" => Ok(Self::Baixa),
            "media" => Ok(Self::Media),
            "alta" => Ok(Self::Alta),
            "urgente" => Ok(Self::Urgente),
            _ => Err(InvalidPriorityError(s.to_string())),
        }
    }
}

/// A `Task` belongs to exactly one owner. It can be assigned by another
/// user at creation time and shared with any number of users; shared
/// users can read and comment, only the owner can modify or delete.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: ID,
    pub user_id: ID,
    /// Set when somebody else created this task for the owner
    pub assigned_by: Option<ID>,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub priority: Priority,
    /// Deadline in millis. Tasks without a due date never produce reminders.
    pub due_date: Option<i64>,
    pub completed: bool,
    pub tags: Vec<Tag>,
    pub shared_with: Vec<ID>,
    pub created: i64,
    pub updated: i64,
}

impl Task {
    pub fn new(user_id: ID, title: String, task_type: TaskType, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            assigned_by: None,
            title,
            description: String::new(),
            task_type,
            priority: Default::default(),
            due_date: None,
            completed: false,
            tags: Vec::new(),
            shared_with: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Whether `user_id` may read this task (owner or shared-with)
    pub fn is_visible_to(&self, user_id: &ID) -> bool {
        self.user_id == *user_id || self.shared_with.contains(user_id)
    }
}

impl Entity<ID> for Task {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_parses_task_types_and_priorities() {
        assert_eq!("casa".parse::<TaskType>().unwrap(), TaskType::Casa);
        assert_eq!("urgente".parse::<Priority>().unwrap(), Priority::Urgente);
        assert!("escritorio".parse::<TaskType>().is_err());
        assert!("".parse::<Priority>().is_err());
    }

    #[test]
    fn priority_ranks_are_strictly_increasing() {
        assert!(Priority::Baixa.rank() < Priority::Media.rank());
        assert!(Priority::Media.rank() < Priority::Alta.rank());
        assert!(Priority::Alta.rank() < Priority::Urgente.rank());
    }

    #[test]
    fn task_visibility_covers_owner_and_shared_users() {
        let owner = ID::new();
        let friend = ID::new();
        let stranger = ID::new();
        let mut task = Task::new(owner.clone(), "limpar a casa".into(), TaskType::Casa, 0);
        task.shared_with.push(friend.clone());

        assert!(task.is_visible_to(&owner));
        assert!(task.is_visible_to(&friend));
        assert!(!task.is_visible_to(&stranger));
    }
}
