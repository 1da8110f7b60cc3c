use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_notification_debug::*;
use tarefa_domain::{Notification, Task, User};
use tarefa_infra::TarefaContext;

const DEBUG_ITEM_LIMIT: usize = 10;

/// Diagnostic snapshot: the caller's notification configuration, their
/// next due tasks and the most recent dispatch records. Reads the same
/// data the engine reads.
pub async fn get_notification_debug_controller(
    http_req: HttpRequest,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetNotificationDebugUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|(user, tasks, notifications)| {
            HttpResponse::Ok().json(APIResponse::new(user, tasks, notifications))
        })
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct GetNotificationDebugUseCase {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for TarefaError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationDebugUseCase {
    type Response = (User, Vec<Task>, Vec<Notification>);

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotificationDebug";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let tasks = ctx
            .repos
            .tasks
            .find_upcoming_by_user(&self.user.id, DEBUG_ITEM_LIMIT)
            .await;
        let notifications = ctx
            .repos
            .notifications
            .find_recent_by_user(&self.user.id, DEBUG_ITEM_LIMIT)
            .await;

        Ok((self.user.clone(), tasks, notifications))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::{Channel, ReminderCategory, TaskType};

    #[actix_web::main]
    #[test]
    async fn it_returns_upcoming_tasks_and_recent_records_capped_at_ten() {
        let ctx = TarefaContext::create_inmemory();
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();

        for i in 0..12 {
            let mut task = Task::new(
                user.id.clone(),
                format!("tarefa {}", i),
                TaskType::Casa,
                0,
            );
            task.due_date = Some(1_000 + i);
            ctx.repos.tasks.insert(&task).await.unwrap();

            let notification = Notification::new(
                user.id.clone(),
                task.id.clone(),
                ReminderCategory::DueSoon,
                Channel::Email,
                2_000 + i,
            );
            ctx.repos.notifications.insert(&notification).await.unwrap();
        }

        let mut usecase = GetNotificationDebugUseCase { user: user.clone() };
        let (debug_user, tasks, notifications) = usecase.execute(&ctx).await.unwrap();

        assert_eq!(debug_user.id, user.id);
        assert_eq!(tasks.len(), 10);
        // Soonest due first
        assert_eq!(tasks[0].due_date, Some(1_000));
        assert_eq!(notifications.len(), 10);
        // Newest record first
        assert_eq!(notifications[0].sent_at, 2_011);
    }
}
