use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_comments::*;
use tarefa_domain::{Comment, User, ID};
use tarefa_infra::TarefaContext;

pub async fn get_comments_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetCommentsUseCase {
        user,
        task_id: path_params.task_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|comments| HttpResponse::Ok().json(APIResponse::new(comments)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct GetCommentsUseCase {
    pub user: User,
    pub task_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    TaskNotFound(ID),
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TaskNotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCommentsUseCase {
    type Response = Vec<Comment>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetComments";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) if task.is_visible_to(&self.user.id) => {}
            _ => return Err(UseCaseError::TaskNotFound(self.task_id.clone())),
        }

        Ok(ctx.repos.comments.find_by_task(&self.task_id).await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::{Task, TaskType};

    #[actix_web::main]
    #[test]
    async fn comments_come_back_oldest_first() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        let task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        ctx.repos.tasks.insert(&task).await.unwrap();

        for (content, created) in [("segunda", 200), ("primeira", 100)] {
            let comment = Comment::new(task.id.clone(), owner.id.clone(), content.into(), created);
            ctx.repos.comments.insert(&comment).await.unwrap();
        }

        let mut usecase = GetCommentsUseCase {
            user: owner,
            task_id: task.id.clone(),
        };
        let comments = usecase.execute(&ctx).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "primeira");
    }
}
