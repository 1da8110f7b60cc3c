use super::ICommentRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tarefa_domain::{Comment, ID};

pub struct PostgresCommentRepo {
    pool: PgPool,
}

impl PostgresCommentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRaw {
    comment_uid: Uuid,
    task_uid: Uuid,
    user_uid: Uuid,
    content: String,
    created: i64,
    updated: i64,
}

impl From<CommentRaw> for Comment {
    fn from(raw: CommentRaw) -> Self {
        Self {
            id: raw.comment_uid.into(),
            task_id: raw.task_uid.into(),
            user_id: raw.user_uid.into(),
            content: raw.content,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl ICommentRepo for PostgresCommentRepo {
    async fn insert(&self, comment: &Comment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO comments
            (comment_uid, task_uid, user_uid, content, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id.inner_ref())
        .bind(comment.task_id.inner_ref())
        .bind(comment.user_id.inner_ref())
        .bind(&comment.content)
        .bind(comment.created)
        .bind(comment.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, comment: &Comment) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE comments
            SET content = $2,
            updated = $3
            WHERE comment_uid = $1
            "#,
        )
        .bind(comment.id.inner_ref())
        .bind(&comment.content)
        .bind(comment.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, comment_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM comments WHERE comment_uid = $1")
            .bind(comment_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, comment_id: &ID) -> Option<Comment> {
        sqlx::query_as::<_, CommentRaw>(
            r#"
            SELECT * FROM comments AS c
            WHERE c.comment_uid = $1
            "#,
        )
        .bind(comment_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|comment| comment.into())
    }

    async fn find_by_task(&self, task_id: &ID) -> Vec<Comment> {
        sqlx::query_as::<_, CommentRaw>(
            r#"
            SELECT * FROM comments AS c
            WHERE c.task_uid = $1
            ORDER BY c.created ASC
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|comment| comment.into())
        .collect()
    }
}
