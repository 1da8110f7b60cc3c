mod inmemory;
mod postgres;

pub use inmemory::InMemoryTaskRepo;
pub use postgres::PostgresTaskRepo;
use tarefa_domain::{Task, ID};

use super::shared::query_structs::TaskFindQuery;

#[async_trait::async_trait]
pub trait ITaskRepo: Send + Sync {
    async fn insert(&self, task: &Task) -> anyhow::Result<()>;
    async fn save(&self, task: &Task) -> anyhow::Result<()>;
    async fn delete(&self, task_id: &ID) -> anyhow::Result<()>;
    async fn find(&self, task_id: &ID) -> Option<Task>;
    /// Filtered, sorted, paginated listing plus the total match count
    async fn find_by_user(&self, query: TaskFindQuery) -> anyhow::Result<(Vec<Task>, usize)>;
    /// The reminder engine's scan: every task with a due date that is not
    /// completed yet, across all users
    async fn find_due_unfinished(&self) -> anyhow::Result<Vec<Task>>;
    /// The user's next unfinished due tasks, soonest first
    async fn find_upcoming_by_user(&self, user_id: &ID, limit: usize) -> Vec<Task>;
    async fn add_share(&self, task_id: &ID, user_id: &ID) -> anyhow::Result<()>;
    async fn remove_share(&self, task_id: &ID, user_id: &ID) -> anyhow::Result<()>;
}
