use serde::{Deserialize, Serialize};
use tarefa_domain::{Priority, Task, TaskType, ID};

use crate::dtos::TagDTO;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDTO {
    pub id: ID,
    pub user_id: ID,
    pub assigned_by: Option<ID>,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub priority: Priority,
    pub due_date: Option<i64>,
    pub completed: bool,
    pub tags: Vec<TagDTO>,
    pub shared_with: Vec<ID>,
    pub created: i64,
    pub updated: i64,
}

impl TaskDTO {
    pub fn new(task: Task) -> Self {
        Self {
            id: task.id,
            user_id: task.user_id,
            assigned_by: task.assigned_by,
            title: task.title,
            description: task.description,
            task_type: task.task_type,
            priority: task.priority,
            due_date: task.due_date,
            completed: task.completed,
            tags: task.tags.into_iter().map(TagDTO::new).collect(),
            shared_with: task.shared_with,
            created: task.created,
            updated: task.updated,
        }
    }
}
