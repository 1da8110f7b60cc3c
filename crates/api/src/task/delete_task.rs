use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::delete_task::*;
use tarefa_domain::{Task, User, ID};
use tarefa_infra::TarefaContext;

pub async fn delete_task_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteTaskUseCase {
        user,
        task_id: path_params.task_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct DeleteTaskUseCase {
    pub user: User,
    pub task_id: ID,
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
                Self::Forbidden("Only the task owner can delete the task".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteTask";

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
            .delete(&task.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::TaskType;

    #[actix_web::main]
    #[test]
    async fn only_the_owner_can_delete() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let other = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        ctx.repos.users.insert(&other).await.unwrap();

        let task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut not_owner = DeleteTaskUseCase {
            user: other,
            task_id: task.id.clone(),
        };
        assert_eq!(
            not_owner.execute(&ctx).await.unwrap_err(),
            UseCaseError::Forbidden
        );

        let mut as_owner = DeleteTaskUseCase {
            user: owner,
            task_id: task.id.clone(),
        };
        as_owner.execute(&ctx).await.expect("To delete task");
        assert!(ctx.repos.tasks.find(&task.id).await.is_none());
    }
}
