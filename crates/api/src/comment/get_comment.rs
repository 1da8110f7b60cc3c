use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_comment::*;
use tarefa_domain::{Comment, User, ID};
use tarefa_infra::TarefaContext;

pub async fn get_comment_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetCommentUseCase {
        user,
        comment_id: path_params.comment_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|comment| HttpResponse::Ok().json(APIResponse::new(comment)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct GetCommentUseCase {
    pub user: User,
    pub comment_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(comment_id) => Self::NotFound(format!(
                "The comment with id: {}, was not found.",
                comment_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetCommentUseCase {
    type Response = Comment;

    type Error = UseCaseError;

    const NAME: &'static str = "GetComment";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let comment = ctx
            .repos
            .comments
            .find(&self.comment_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.comment_id.clone()))?;

        // Visible iff the underlying task is visible
        match ctx.repos.tasks.find(&comment.task_id).await {
            Some(task) if task.is_visible_to(&self.user.id) => Ok(comment),
            _ => Err(UseCaseError::NotFound(self.comment_id.clone())),
        }
    }
}
