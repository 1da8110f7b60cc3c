use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::create_tag::*;
use tarefa_domain::{Tag, User};
use tarefa_infra::TarefaContext;

pub async fn create_tag_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateTagUseCase {
        user,
        name: body.name,
        color: body.color.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|tag| HttpResponse::Created().json(APIResponse::new(tag)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct CreateTagUseCase {
    pub user: User,
    pub name: String,
    pub color: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidInput(String),
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTagUseCase {
    type Response = Tag;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTag";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        if self.name.trim().is_empty() {
            return Err(UseCaseError::InvalidInput("name is required".into()));
        }
        if !self.color.is_empty() && (!self.color.starts_with('#') || self.color.len() != 7) {
            return Err(UseCaseError::InvalidInput(
                "color must be a hex code like #FF5733".into(),
            ));
        }

        let tag = Tag::new(
            self.user.id.clone(),
            self.name.clone(),
            self.color.clone(),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .tags
            .insert(&tag)
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
    async fn it_creates_a_tag_and_validates_the_color() {
        let ctx = TarefaContext::create_inmemory();
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = CreateTagUseCase {
            user: user.clone(),
            name: "mercado".into(),
            color: "#00FF00".into(),
        };
        let tag = usecase.execute(&ctx).await.expect("To create tag");
        assert_eq!(tag.user_id, user.id);

        let mut bad_color = CreateTagUseCase {
            user,
            name: "mercado".into(),
            color: "verde".into(),
        };
        assert!(matches!(
            bad_color.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidInput(_)
        ));
    }
}
