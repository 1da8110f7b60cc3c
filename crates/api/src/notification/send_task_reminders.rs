use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::dtos::CycleReportDTO;
use tarefa_api_structs::trigger_notification_check::*;
use tarefa_domain::{
    classify_due_date, local_date_of_millis, local_day_bounds_millis, Channel, Notification,
};
use tarefa_infra::TarefaContext;
use tracing::{debug, error, info, warn};

/// Manual trigger: runs one reminder cycle synchronously. The response is
/// HTTP 200 even when individual sends failed; the counts and the server
/// logs carry the failure detail.
pub async fn trigger_notification_check_controller(
    http_req: HttpRequest,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    protect_route(&http_req, &ctx).await?;

    let usecase = SendTaskRemindersUseCase {
        reference_time: ctx.sys.get_timestamp_millis(),
    };

    execute(usecase, &ctx)
        .await
        .map(|report| {
            HttpResponse::Ok().json(APIResponse::new(CycleReportDTO {
                tasks_scanned: report.tasks_scanned,
                tasks_skipped: report.tasks_skipped,
                notifications_attempted: report.notifications_attempted,
                notifications_succeeded: report.notifications_succeeded,
                notifications_failed: report.notifications_failed,
            }))
        })
        .map_err(TarefaError::from)
}

/// One full scan-classify-dispatch cycle over every uncompleted task with
/// a due date. Failures are contained per task and channel; only a failure
/// to load the task set aborts the cycle.
#[derive(Debug)]
pub struct SendTaskRemindersUseCase {
    /// Millis timestamp the cycle treats as "now"; its local calendar
    /// date is the reference day for classification and deduplication
    pub reference_time: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub tasks_scanned: usize,
    pub tasks_skipped: usize,
    pub notifications_attempted: usize,
    pub notifications_succeeded: usize,
    pub notifications_failed: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendTaskRemindersUseCase {
    type Response = CycleReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendTaskReminders";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let reference_date = local_date_of_millis(self.reference_time);
        let day_window = local_day_bounds_millis(self.reference_time);
        info!("Starting notification check, reference date: {}", reference_date);

        let tasks = ctx
            .repos
            .tasks
            .find_due_unfinished()
            .await
            .map_err(|e| {
                error!("Error fetching tasks for notification check: {:?}", e);
                UseCaseError::StorageError
            })?;
        info!("Found {} tasks with due dates", tasks.len());

        let mut report = CycleReport::default();
        for task in tasks {
            report.tasks_scanned += 1;

            let due_date = match task.due_date {
                Some(due_date) => due_date,
                None => {
                    report.tasks_skipped += 1;
                    continue;
                }
            };

            let owner = match ctx.repos.users.find(&task.user_id).await {
                Some(owner) => owner,
                None => {
                    warn!("Task {}: owner not found, skipping", task.id);
                    report.tasks_skipped += 1;
                    continue;
                }
            };
            if !owner.notifications_enabled {
                debug!("Task {}: skipping (user notifications disabled)", task.id);
                report.tasks_skipped += 1;
                continue;
            }

            let category = match classify_due_date(local_date_of_millis(due_date), reference_date)
            {
                Some(category) => category,
                None => {
                    report.tasks_skipped += 1;
                    continue;
                }
            };
            debug!("Task {}: classified as {}", task.id, category);

            for channel in [Channel::Email, Channel::Telegram] {
                let destination = match channel {
                    Channel::Email => owner.email.clone(),
                    Channel::Telegram => owner.telegram_chat_id.clone().unwrap_or_default(),
                };
                if destination.is_empty() {
                    debug!("Task {}: no {} destination, skipping channel", task.id, channel);
                    continue;
                }

                // An unreadable dispatch log must read as "do not send":
                // a duplicate reminder is acceptable, sending into the
                // unknown is not
                let already_sent = match ctx
                    .repos
                    .notifications
                    .exists(&owner.id, &task.id, category, channel, day_window)
                    .await
                {
                    Ok(already_sent) => already_sent,
                    Err(e) => {
                        error!(
                            "Task {}: dispatch log unreadable for {} channel, not sending: {:?}",
                            task.id, channel, e
                        );
                        report.notifications_failed += 1;
                        continue;
                    }
                };
                if already_sent {
                    debug!(
                        "Task {}: {} {} reminder already sent today, skipping",
                        task.id, channel, category
                    );
                    continue;
                }

                report.notifications_attempted += 1;
                let send_result = match channel {
                    Channel::Email => {
                        ctx.services
                            .email
                            .send_task_reminder(&destination, &task, category)
                            .await
                    }
                    Channel::Telegram => {
                        ctx.services
                            .telegram
                            .send_task_reminder(&destination, &task, category)
                            .await
                    }
                };

                match send_result {
                    Ok(()) => {
                        report.notifications_succeeded += 1;
                        let notification = Notification::new(
                            owner.id.clone(),
                            task.id.clone(),
                            category,
                            channel,
                            ctx.sys.get_timestamp_millis(),
                        );
                        // The message is already out; a failure to record
                        // it costs at most a future duplicate
                        if let Err(e) = ctx.repos.notifications.insert(&notification).await {
                            error!(
                                "Task {}: failed to record {} notification: {:?}",
                                task.id, channel, e
                            );
                        }
                    }
                    Err(e) => {
                        report.notifications_failed += 1;
                        error!(
                            "Task {}: failed to send {} notification: {}",
                            task.id, channel, e
                        );
                    }
                }
            }
        }

        info!(
            "Notification check completed: {} scanned, {} skipped, {} attempted, {} succeeded, {} failed",
            report.tasks_scanned,
            report.tasks_skipped,
            report.notifications_attempted,
            report.notifications_succeeded,
            report.notifications_failed
        );
        Ok(report)
    }
}
