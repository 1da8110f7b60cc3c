use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tarefa_domain::{Channel, Notification, ReminderCategory, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
    /// When set, `exists` reports a storage failure. Used to test that the
    /// engine refuses to send when the dispatch log is unreadable.
    fail_exists: AtomicBool,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(vec![]),
            fail_exists: AtomicBool::new(false),
        }
    }

    pub fn set_fail_exists(&self, fail: bool) {
        self.fail_exists.store(fail, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
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
        if self.fail_exists.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("dispatch log unavailable"));
        }
        Ok(!find_by(&self.notifications, |n: &Notification| {
            n.user_id == *user_id
                && n.task_id == *task_id
                && n.category == category
                && n.channel == channel
                && n.sent_at >= window.0
                && n.sent_at < window.1
        })
        .is_empty())
    }

    async fn find_recent_by_user(&self, user_id: &ID, limit: usize) -> Vec<Notification> {
        let mut notifications = find_by(&self.notifications, |n: &Notification| {
            n.user_id == *user_id
        });
        notifications.sort_by_key(|n| std::cmp::Reverse(n.sent_at));
        notifications.into_iter().take(limit).collect()
    }
}
