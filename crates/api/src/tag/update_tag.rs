use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::update_tag::*;
use tarefa_domain::{Tag, User, ID};
use tarefa_infra::TarefaContext;

pub async fn update_tag_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateTagUseCase {
        user,
        tag_id: path_params.tag_id.clone(),
        name: body.name,
        color: body.color,
    };

    execute(usecase, &ctx)
        .await
        .map(|tag| HttpResponse::Ok().json(APIResponse::new(tag)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct UpdateTagUseCase {
    pub user: User,
    pub tag_id: ID,
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidInput(String),
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(tag_id) => {
                Self::NotFound(format!("The tag with id: {}, was not found.", tag_id))
            }
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTagUseCase {
    type Response = Tag;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTag";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let mut tag = match ctx.repos.tags.find(&self.tag_id).await {
            Some(tag) if tag.user_id == self.user.id => tag,
            _ => return Err(UseCaseError::NotFound(self.tag_id.clone())),
        };

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(UseCaseError::InvalidInput("name cannot be empty".into()));
            }
            tag.name = name.clone();
        }
        if let Some(color) = &self.color {
            if !color.is_empty() && (!color.starts_with('#') || color.len() != 7) {
                return Err(UseCaseError::InvalidInput(
                    "color must be a hex code like #FF5733".into(),
                ));
            }
            tag.color = color.clone();
        }
        tag.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .tags
            .save(&tag)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(tag)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn foreign_tags_are_reported_as_missing() {
        let ctx = TarefaContext::create_inmemory();
        let ana = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let bia = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&ana).await.unwrap();
        ctx.repos.users.insert(&bia).await.unwrap();

        let tag = Tag::new(ana.id.clone(), "casa".into(), String::new(), 0);
        ctx.repos.tags.insert(&tag).await.unwrap();

        let mut usecase = UpdateTagUseCase {
            user: bia,
            tag_id: tag.id.clone(),
            name: Some("roubada".into()),
            color: None,
        };
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::NotFound(tag.id)
        );
    }
}
