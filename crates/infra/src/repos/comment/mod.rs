mod inmemory;
mod postgres;

pub use inmemory::InMemoryCommentRepo;
pub use postgres::PostgresCommentRepo;
use tarefa_domain::{Comment, ID};

#[async_trait::async_trait]
pub trait ICommentRepo: Send + Sync {
    async fn insert(&self, comment: &Comment) -> anyhow::Result<()>;
    async fn save(&self, comment: &Comment) -> anyhow::Result<()>;
    async fn delete(&self, comment_id: &ID) -> anyhow::Result<()>;
    async fn find(&self, comment_id: &ID) -> Option<Comment>;
    async fn find_by_task(&self, task_id: &ID) -> Vec<Comment>;
}
