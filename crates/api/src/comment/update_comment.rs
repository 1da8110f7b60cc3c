use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::update_comment::*;
use tarefa_domain::{Comment, User, ID};
use tarefa_infra::TarefaContext;

pub async fn update_comment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateCommentUseCase {
        user,
        comment_id: path_params.comment_id.clone(),
        content: body.0.content,
    };

    execute(usecase, &ctx)
        .await
        .map(|comment| HttpResponse::Ok().json(APIResponse::new(comment)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct UpdateCommentUseCase {
    pub user: User,
    pub comment_id: ID,
    pub content: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden,
    InvalidInput(String),
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(comment_id) => Self::NotFound(format!(
                "The comment with id: {}, was not found.",
                comment_id
            )),
            UseCaseError::Forbidden => {
                Self::Forbidden("Only the comment author can edit the comment".into())
            }
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCommentUseCase {
    type Response = Comment;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateComment";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        if self.content.trim().is_empty() {
            return Err(UseCaseError::InvalidInput("content is required".into()));
        }

        let mut comment = ctx
            .repos
            .comments
            .find(&self.comment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.comment_id.clone()))?;

        if comment.user_id != self.user.id {
            return Err(UseCaseError::Forbidden);
        }

        comment.content = self.content.clone();
        comment.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .comments
            .save(&comment)
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
    async fn only_the_author_can_edit() {
        let ctx = TarefaContext::create_inmemory();
        let author = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let other = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&author).await.unwrap();
        ctx.repos.users.insert(&other).await.unwrap();

        let task = Task::new(author.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        ctx.repos.tasks.insert(&task).await.unwrap();
        let comment = Comment::new(task.id.clone(), author.id.clone(), "original".into(), 0);
        ctx.repos.comments.insert(&comment).await.unwrap();

        let mut as_other = UpdateCommentUseCase {
            user: other,
            comment_id: comment.id.clone(),
            content: "editado".into(),
        };
        assert_eq!(
            as_other.execute(&ctx).await.unwrap_err(),
            UseCaseError::Forbidden
        );

        let mut as_author = UpdateCommentUseCase {
            user: author,
            comment_id: comment.id.clone(),
            content: "editado".into(),
        };
        let updated = as_author.execute(&ctx).await.expect("To update comment");
        assert_eq!(updated.content, "editado");
    }
}
