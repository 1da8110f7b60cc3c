use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_tag::*;
use tarefa_domain::{Tag, User, ID};
use tarefa_infra::TarefaContext;

pub async fn get_tag_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetTagUseCase {
        user,
        tag_id: path_params.tag_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|tag| HttpResponse::Ok().json(APIResponse::new(tag)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct GetTagUseCase {
    pub user: User,
    pub tag_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(tag_id) => {
                Self::NotFound(format!("The tag with id: {}, was not found.", tag_id))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTagUseCase {
    type Response = Tag;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTag";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.tags.find(&self.tag_id).await {
            Some(tag) if tag.user_id == self.user.id => Ok(tag),
            _ => Err(UseCaseError::NotFound(self.tag_id.clone())),
        }
    }
}
