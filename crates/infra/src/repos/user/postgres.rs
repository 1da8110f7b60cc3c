use super::IUserRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tarefa_domain::{User, ID};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    username: String,
    email: String,
    password_hash: String,
    telegram_chat_id: Option<String>,
    notifications_enabled: bool,
    created: i64,
    updated: i64,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.user_uid.into(),
            username: raw.username,
            email: raw.email,
            password_hash: raw.password_hash,
            telegram_chat_id: raw.telegram_chat_id,
            notifications_enabled: raw.notifications_enabled,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (user_uid, username, email, password_hash, telegram_chat_id, notifications_enabled, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.telegram_chat_id)
        .bind(user.notifications_enabled)
        .bind(user.created)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET username = $2,
            email = $3,
            password_hash = $4,
            telegram_chat_id = $5,
            notifications_enabled = $6,
            updated = $7
            WHERE user_uid = $1
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.telegram_chat_id)
        .bind(user.notifications_enabled)
        .bind(user.updated)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|user| user.into())
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.username = $1 OR u.email = $1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|user| user.into())
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT count(*) FROM users AS u
            WHERE u.username = $1 OR u.email = $2
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn find_all(&self, skip: usize, limit: usize) -> anyhow::Result<(Vec<User>, usize)> {
        let total: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let users: Vec<UserRaw> = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            ORDER BY u.created ASC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(skip as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok((users.into_iter().map(|u| u.into()).collect(), total as usize))
    }
}
