use tarefa_domain::{Priority, TaskType, ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSortBy {
    CreatedAt,
    DueDate,
    Title,
    Priority,
}

impl Default for TaskSortBy {
    fn default() -> Self {
        Self::CreatedAt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::Desc
    }
}

/// Filter/sort/pagination options for listing the tasks a user can see
/// (owned or shared with them).
#[derive(Debug, Clone)]
pub struct TaskFindQuery {
    pub user_id: ID,
    pub task_type: Option<TaskType>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
    /// Case-insensitive substring match over title and description
    pub search: Option<String>,
    pub due_date_from: Option<i64>,
    pub due_date_to: Option<i64>,
    pub assigned_by: Option<ID>,
    /// When non-empty, only tasks carrying at least one of these tags
    pub tag_ids: Vec<ID>,
    pub skip: usize,
    pub limit: usize,
    pub sort_by: TaskSortBy,
    pub order: SortOrder,
}

impl TaskFindQuery {
    pub fn for_user(user_id: ID) -> Self {
        Self {
            user_id,
            task_type: None,
            completed: None,
            priority: None,
            search: None,
            due_date_from: None,
            due_date_to: None,
            assigned_by: None,
            tag_ids: Vec::new(),
            skip: 0,
            limit: 10,
            sort_by: Default::default(),
            order: Default::default(),
        }
    }
}
