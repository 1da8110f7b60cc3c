use serde::{Deserialize, Serialize};
use tarefa_domain::{Channel, Notification, ReminderCategory, User, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub task_id: ID,
    pub category: ReminderCategory,
    pub channel: Channel,
    pub sent_at: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            task_id: notification.task_id,
            category: notification.category,
            channel: notification.channel,
            sent_at: notification.sent_at,
        }
    }
}

/// The caller's own notification configuration, as shown by the debug
/// snapshot endpoint
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfigDTO {
    pub id: ID,
    pub username: String,
    pub email: String,
    pub notifications_enabled: bool,
    pub telegram_chat_id: Option<String>,
}

impl NotificationConfigDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            notifications_enabled: user.notifications_enabled,
            telegram_chat_id: user.telegram_chat_id,
        }
    }
}

/// Outcome counters of one engine cycle
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReportDTO {
    pub tasks_scanned: usize,
    pub tasks_skipped: usize,
    pub notifications_attempted: usize,
    pub notifications_succeeded: usize,
    pub notifications_failed: usize,
}
