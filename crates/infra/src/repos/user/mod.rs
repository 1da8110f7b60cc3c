mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;
use tarefa_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn save(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> Option<User>;
    /// Login lookup: the identifier may be a username or an email address
    async fn find_by_username_or_email(&self, identifier: &str) -> Option<User>;
    async fn exists_by_username_or_email(&self, username: &str, email: &str)
        -> anyhow::Result<bool>;
    /// Paginated listing, oldest accounts first. Also returns the total
    /// number of users for pagination arithmetic.
    async fn find_all(&self, skip: usize, limit: usize) -> anyhow::Result<(Vec<User>, usize)>;
}
