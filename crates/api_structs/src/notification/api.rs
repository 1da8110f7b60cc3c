use serde::{Deserialize, Serialize};
use tarefa_domain::{Notification, Task, User};

use crate::dtos::{CycleReportDTO, NotificationConfigDTO, NotificationDTO, TaskDTO};

pub mod trigger_notification_check {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
        pub report: CycleReportDTO,
    }

    impl APIResponse {
        pub fn new(report: CycleReportDTO) -> Self {
            Self {
                message: "Notification check completed. Check server logs for details.".into(),
                report,
            }
        }
    }
}

pub mod get_notification_debug {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub user: NotificationConfigDTO,
        pub tasks_count: usize,
        pub tasks: Vec<TaskDTO>,
        pub notifications_count: usize,
        pub recent_notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(user: User, tasks: Vec<Task>, notifications: Vec<Notification>) -> Self {
            Self {
                user: NotificationConfigDTO::new(user),
                tasks_count: tasks.len(),
                tasks: tasks.into_iter().map(TaskDTO::new).collect(),
                notifications_count: notifications.len(),
                recent_notifications: notifications
                    .into_iter()
                    .map(NotificationDTO::new)
                    .collect(),
            }
        }
    }
}
