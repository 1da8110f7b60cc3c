use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_task::*;
use tarefa_domain::{Task, User, ID};
use tarefa_infra::TarefaContext;

pub async fn get_task_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetTaskUseCase {
        user,
        task_id: path_params.task_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct GetTaskUseCase {
    pub user: User,
    pub task_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTask";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        // A task that exists but is not visible is reported as missing,
        // not as forbidden
        match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) if task.is_visible_to(&self.user.id) => Ok(task),
            _ => Err(UseCaseError::NotFound(self.task_id.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::TaskType;

    #[actix_web::main]
    #[test]
    async fn owner_and_shared_user_can_read_others_cannot() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let friend = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        let stranger = User::new("caio".into(), "caio@example.com".into(), "hash".into(), 0);
        for user in [&owner, &friend, &stranger] {
            ctx.repos.users.insert(user).await.unwrap();
        }

        let mut task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        task.shared_with.push(friend.id.clone());
        ctx.repos.tasks.insert(&task).await.unwrap();

        for user in [owner, friend] {
            let mut usecase = GetTaskUseCase {
                user,
                task_id: task.id.clone(),
            };
            assert!(usecase.execute(&ctx).await.is_ok());
        }

        let mut usecase = GetTaskUseCase {
            user: stranger,
            task_id: task.id.clone(),
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(task.id)
        );
    }
}
