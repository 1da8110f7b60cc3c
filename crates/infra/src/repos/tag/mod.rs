mod inmemory;
mod postgres;

pub use inmemory::InMemoryTagRepo;
pub use postgres::PostgresTagRepo;
use tarefa_domain::{Tag, ID};

#[async_trait::async_trait]
pub trait ITagRepo: Send + Sync {
    async fn insert(&self, tag: &Tag) -> anyhow::Result<()>;
    async fn save(&self, tag: &Tag) -> anyhow::Result<()>;
    async fn delete(&self, tag_id: &ID) -> anyhow::Result<()>;
    async fn find(&self, tag_id: &ID) -> Option<Tag>;
    async fn find_by_user(&self, user_id: &ID) -> Vec<Tag>;
    /// Resolves the given ids, keeping only tags owned by `user_id`.
    /// Callers compare the result length against the input to detect
    /// foreign or missing tags.
    async fn find_many_by_user(&self, tag_ids: &[ID], user_id: &ID) -> Vec<Tag>;
}
