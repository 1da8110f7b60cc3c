use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::unshare_task::*;
use tarefa_domain::{Task, User, ID};
use tarefa_infra::TarefaContext;

pub async fn unshare_task_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UnshareTaskUseCase {
        user,
        task_id: path_params.task_id.clone(),
        shared_user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct UnshareTaskUseCase {
    pub user: User,
    pub task_id: ID,
    pub shared_user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
            UseCaseError::Forbidden => {
                Self::Forbidden("Only the task owner can unshare the task".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UnshareTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "UnshareTask";

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

        ctx.repos
            .tasks
            .remove_share(&task.id, &self.shared_user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

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
    async fn owner_can_revoke_a_share() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let friend = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        ctx.repos.users.insert(&friend).await.unwrap();

        let mut task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        task.shared_with.push(friend.id.clone());
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut usecase = UnshareTaskUseCase {
            user: owner,
            task_id: task.id.clone(),
            shared_user_id: friend.id.clone(),
        };
        let updated = usecase.execute(&ctx).await.expect("To unshare task");
        assert!(updated.shared_with.is_empty());
    }
}
