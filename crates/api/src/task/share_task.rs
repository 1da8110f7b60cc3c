use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::share_task::*;
use tarefa_domain::{Task, User, ID};
use tarefa_infra::TarefaContext;

pub async fn share_task_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = ShareTaskUseCase {
        user,
        task_id: path_params.task_id.clone(),
        user_ids: body.0.user_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct ShareTaskUseCase {
    pub user: User,
    pub task_id: ID,
    pub user_ids: Vec<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden,
    InvalidUserIds,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
            UseCaseError::Forbidden => {
                Self::Forbidden("Only the task owner can share the task".into())
            }
            UseCaseError::InvalidUserIds => {
                Self::BadClientData("One or more user IDs are invalid".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ShareTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "ShareTask";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let task = ctx
            .repos
            .tasks
            .find(&self.task_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.task_id.clone()))?;

        if task.user_id != self.user.id {
            return Err(UseCaseError::Forbidden);
        }

        for user_id in &self.user_ids {
            // The owner already has access
            if *user_id == self.user.id {
                continue;
            }
            if ctx.repos.users.find(user_id).await.is_none() {
                return Err(UseCaseError::InvalidUserIds);
            }
            ctx.repos
                .tasks
                .add_share(&task.id, user_id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        ctx.repos
            .tasks
            .find(&self.task_id)
            .await
            .ok_or(UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::TaskType;

    #[actix_web::main]
    #[test]
    async fn sharing_is_idempotent_and_owner_only() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let friend = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        ctx.repos.users.insert(&friend).await.unwrap();

        let task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut usecase = ShareTaskUseCase {
            user: owner.clone(),
            task_id: task.id.clone(),
            user_ids: vec![friend.id.clone(), friend.id.clone()],
        };
        let shared = usecase.execute(&ctx).await.expect("To share task");
        assert_eq!(shared.shared_with, vec![friend.id.clone()]);

        let mut not_owner = ShareTaskUseCase {
            user: friend,
            task_id: task.id.clone(),
            user_ids: vec![owner.id.clone()],
        };
        assert_eq!(
            not_owner.execute(&ctx).await.unwrap_err(),
            UseCaseError::Forbidden
        );
    }

    #[actix_web::main]
    #[test]
    async fn unknown_user_ids_are_rejected() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        let task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut usecase = ShareTaskUseCase {
            user: owner,
            task_id: task.id.clone(),
            user_ids: vec![ID::new()],
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidUserIds
        );
    }
}
