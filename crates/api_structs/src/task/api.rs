use serde::{Deserialize, Serialize};
use tarefa_domain::{Priority, Task, TaskType, ID};

use crate::dtos::TaskDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task: TaskDTO,
}

impl TaskResponse {
    pub fn new(task: Task) -> Self {
        Self {
            task: TaskDTO::new(task),
        }
    }
}

pub mod create_task {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(rename = "type")]
        pub task_type: TaskType,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub due_date: Option<i64>,
        /// Assign the task to another user; the creator keeps access
        /// through sharing
        #[serde(default)]
        pub user_id: Option<ID>,
        #[serde(default)]
        pub tag_ids: Option<Vec<ID>>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod get_task {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    pub type APIResponse = TaskResponse;
}

pub mod get_tasks {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub page: Option<usize>,
        #[serde(default)]
        pub limit: Option<usize>,
        #[serde(rename = "type", default)]
        pub task_type: Option<TaskType>,
        #[serde(default)]
        pub completed: Option<bool>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub search: Option<String>,
        #[serde(default)]
        pub due_date_from: Option<i64>,
        #[serde(default)]
        pub due_date_to: Option<i64>,
        /// Shortcut filter: overdue | today | this_week | this_month
        #[serde(default)]
        pub period: Option<String>,
        #[serde(default)]
        pub assigned_by: Option<ID>,
        /// Comma-separated tag ids
        #[serde(default)]
        pub tag_ids: Option<String>,
        /// created_at | due_date | title | priority
        #[serde(default)]
        pub sort_by: Option<String>,
        /// asc | desc
        #[serde(default)]
        pub order: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub tasks: Vec<TaskDTO>,
        pub total: usize,
        pub page: usize,
        pub limit: usize,
        pub total_pages: usize,
    }

    impl APIResponse {
        pub fn new(tasks: Vec<Task>, total: usize, page: usize, limit: usize) -> Self {
            Self {
                tasks: tasks.into_iter().map(TaskDTO::new).collect(),
                total,
                page,
                limit,
                total_pages: total.div_ceil(limit.max(1)),
            }
        }
    }
}

pub mod update_task {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(rename = "type", default)]
        pub task_type: Option<TaskType>,
        #[serde(default)]
        pub priority: Option<Priority>,
        #[serde(default)]
        pub due_date: Option<i64>,
        #[serde(default)]
        pub completed: Option<bool>,
        /// `null`/absent keeps the current tags, an empty list clears them
        #[serde(default)]
        pub tag_ids: Option<Vec<ID>>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod delete_task {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    pub type APIResponse = TaskResponse;
}

pub mod share_task {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub user_ids: Vec<ID>,
    }

    pub type APIResponse = TaskResponse;
}

pub mod unshare_task {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
        pub user_id: ID,
    }

    pub type APIResponse = TaskResponse;
}
