use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::delete_comment::*;
use tarefa_domain::{Comment, User, ID};
use tarefa_infra::TarefaContext;

pub async fn delete_comment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteCommentUseCase {
        user,
        comment_id: path_params.comment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|comment| HttpResponse::Ok().json(APIResponse::new(comment)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct DeleteCommentUseCase {
    pub user: User,
    pub comment_id: ID,
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
            UseCaseError::NotFound(comment_id) => Self::NotFound(format!(
                "The comment with id: {}, was not found.",
                comment_id
            )),
            UseCaseError::Forbidden => {
                Self::Forbidden("Only the comment author can delete the comment".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteCommentUseCase {
    type Response = Comment;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteComment";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let comment = ctx
            .repos
            .comments
            .find(&self.comment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.comment_id.clone()))?;

        if comment.user_id != self.user.id {
            return Err(UseCaseError::Forbidden);
        }

        ctx.repos
            .comments
            .delete(&comment.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(comment)
    }
}
