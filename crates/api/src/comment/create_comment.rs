use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::create_comment::*;
use tarefa_domain::{Comment, User, ID};
use tarefa_infra::TarefaContext;

pub async fn create_comment_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateCommentUseCase {
        user,
        task_id: body.task_id,
        content: body.content,
    };

    execute(usecase, &ctx)
        .await
        .map(|comment| HttpResponse::Created().json(APIResponse::new(comment)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct CreateCommentUseCase {
    pub user: User,
    pub task_id: ID,
    pub content: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    TaskNotFound(ID),
    InvalidInput(String),
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::TaskNotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateCommentUseCase {
    type Response = Comment;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateComment";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        if self.content.trim().is_empty() {
            return Err(UseCaseError::InvalidInput("content is required".into()));
        }

        // Commenting requires read access to the task
        match ctx.repos.tasks.find(&self.task_id).await {
            Some(task) if task.is_visible_to(&self.user.id) => {}
            _ => return Err(UseCaseError::TaskNotFound(self.task_id.clone())),
        }

        let comment = Comment::new(
            self.task_id.clone(),
            self.user.id.clone(),
            self.content.clone(),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .comments
            .insert(&comment)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(comment)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::{Task, TaskType};

    #[actix_web::main]
    #[test]
    async fn shared_users_can_comment_strangers_cannot() {
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

        let mut as_friend = CreateCommentUseCase {
            user: friend,
            task_id: task.id.clone(),
            content: "posso ajudar?".into(),
        };
        let comment = as_friend.execute(&ctx).await.expect("To create comment");
        assert_eq!(comment.task_id, task.id);

        let mut as_stranger = CreateCommentUseCase {
            user: stranger,
            task_id: task.id.clone(),
            content: "intruso".into(),
        };
        assert_eq!(
            as_stranger.execute(&ctx).await.unwrap_err(),
            UseCaseError::TaskNotFound(task.id)
        );
    }
}
