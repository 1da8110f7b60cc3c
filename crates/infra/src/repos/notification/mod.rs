mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;
use tarefa_domain::{Channel, Notification, ReminderCategory, ID};

/// Dispatch log: the durable ledger of sent reminders. Rows are written
/// once per successful send and never touched again; `exists` is the
/// duplicate-send guard the engine consults before every dispatch.
#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Whether a record exists for the exact (user, task, category,
    /// channel) key with `sent_at` inside `[window.0, window.1)`. Callers
    /// must treat an error as "do not send", never as "not sent".
    async fn exists(
        &self,
        user_id: &ID,
        task_id: &ID,
        category: ReminderCategory,
        channel: Channel,
        window: (i64, i64),
    ) -> anyhow::Result<bool>;
    async fn find_recent_by_user(&self, user_id: &ID, limit: usize) -> Vec<Notification>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarefa_domain::local_day_bounds_millis;

    #[tokio::test]
    async fn exists_is_scoped_to_key_and_day() {
        let repo = InMemoryNotificationRepo::new();
        let user_id = ID::new();
        let task_id = ID::new();
        let sent_at = 1_686_830_000_000;
        let window = local_day_bounds_millis(sent_at);

        let notification = Notification::new(
            user_id.clone(),
            task_id.clone(),
            ReminderCategory::DueToday,
            Channel::Email,
            sent_at,
        );
        repo.insert(&notification).await.unwrap();

        assert!(repo
            .exists(
                &user_id,
                &task_id,
                ReminderCategory::DueToday,
                Channel::Email,
                window,
            )
            .await
            .unwrap());

        // Same key, other channel: tracked independently
        assert!(!repo
            .exists(
                &user_id,
                &task_id,
                ReminderCategory::DueToday,
                Channel::Telegram,
                window,
            )
            .await
            .unwrap());

        // Same key, other category
        assert!(!repo
            .exists(
                &user_id,
                &task_id,
                ReminderCategory::Overdue,
                Channel::Email,
                window,
            )
            .await
            .unwrap());

        // Next day: the record no longer suppresses anything
        let next_day = local_day_bounds_millis(window.1);
        assert!(!repo
            .exists(
                &user_id,
                &task_id,
                ReminderCategory::DueToday,
                Channel::Email,
                next_day,
            )
            .await
            .unwrap());
    }

    // Concurrent cycles can race between the exists check and the insert.
    // The log accepts the duplicate row: the accepted worst case is a
    // duplicate reminder, never a lost one.
    #[tokio::test]
    async fn duplicate_inserts_for_the_same_key_are_accepted() {
        let repo = InMemoryNotificationRepo::new();
        let user_id = ID::new();
        let task_id = ID::new();
        let sent_at = 1_686_830_000_000;

        for _ in 0..2 {
            let n = Notification::new(
                user_id.clone(),
                task_id.clone(),
                ReminderCategory::DueToday,
                Channel::Email,
                sent_at,
            );
            repo.insert(&n).await.unwrap();
        }

        assert_eq!(repo.count(), 2);
        assert!(repo
            .exists(
                &user_id,
                &task_id,
                ReminderCategory::DueToday,
                Channel::Email,
                tarefa_domain::local_day_bounds_millis(sent_at),
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn recent_records_are_newest_first_and_limited() {
        let repo = InMemoryNotificationRepo::new();
        let user_id = ID::new();
        for i in 0..5 {
            let n = Notification::new(
                user_id.clone(),
                ID::new(),
                ReminderCategory::Overdue,
                Channel::Email,
                1_000 + i,
            );
            repo.insert(&n).await.unwrap();
        }

        let recent = repo.find_recent_by_user(&user_id, 3).await;
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].sent_at, 1_004);
        assert_eq!(recent[2].sent_at, 1_002);
    }
}
