use super::INotificationRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tarefa_domain::{Channel, Notification, ReminderCategory, ID};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    task_uid: Uuid,
    category: String,
    channel: String,
    sent_at: i64,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Self {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            task_id: raw.task_uid.into(),
            category: raw.category.parse().unwrap(),
            channel: raw.channel.parse().unwrap(),
            sent_at: raw.sent_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, task_uid, category, channel, sent_at)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(notification.task_id.inner_ref())
        .bind(notification.category.as_str())
        .bind(notification.channel.as_str())
        .bind(notification.sent_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn exists(
        &self,
        user_id: &ID,
        task_id: &ID,
        category: ReminderCategory,
        channel: Channel,
        window: (i64, i64),
    ) -> anyhow::Result<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT count(*) FROM notifications AS n
            WHERE n.user_uid = $1 AND
            n.task_uid = $2 AND
            n.category = $3 AND
            n.channel = $4 AND
            n.sent_at >= $5 AND
            n.sent_at < $6
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(task_id.inner_ref())
        .bind(category.as_str())
        .bind(channel.as_str())
        .bind(window.0)
        .bind(window.1)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    async fn find_recent_by_user(&self, user_id: &ID, limit: usize) -> Vec<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.sent_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|n| n.into())
        .collect()
    }
}
