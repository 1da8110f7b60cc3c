mod comment;
mod notification;
mod shared;
mod tag;
mod task;
mod user;

pub use comment::{ICommentRepo, InMemoryCommentRepo};
use comment::PostgresCommentRepo;
pub use notification::{INotificationRepo, InMemoryNotificationRepo};
use notification::PostgresNotificationRepo;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use tag::{ITagRepo, InMemoryTagRepo};
use tag::PostgresTagRepo;
pub use task::{ITaskRepo, InMemoryTaskRepo};
use task::PostgresTaskRepo;
use tracing::info;
pub use user::{IUserRepo, InMemoryUserRepo};
use user::PostgresUserRepo;

pub use shared::query_structs::{SortOrder, TaskFindQuery, TaskSortBy};

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub tasks: Arc<dyn ITaskRepo>,
    pub tags: Arc<dyn ITagRepo>,
    pub comments: Arc<dyn ICommentRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");
        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepo::new(pool.clone())),
            tags: Arc::new(PostgresTagRepo::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            tasks: Arc::new(InMemoryTaskRepo::new()),
            tags: Arc::new(InMemoryTagRepo::new()),
            comments: Arc::new(InMemoryCommentRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
