use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_tags::*;
use tarefa_domain::{Tag, User};
use tarefa_infra::TarefaContext;

pub async fn get_tags_controller(
    http_req: HttpRequest,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetTagsUseCase { user };

    execute(usecase, &ctx)
        .await
        .map(|tags| HttpResponse::Ok().json(APIResponse::new(tags)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct GetTagsUseCase {
    pub user: User,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for TarefaError {
    fn from(_: UseCaseError) -> Self {
        Self::InternalError
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTagsUseCase {
    type Response = Vec<Tag>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetTags";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.tags.find_by_user(&self.user.id).await)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_lists_only_the_callers_tags() {
        let ctx = TarefaContext::create_inmemory();
        let ana = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let bia = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&ana).await.unwrap();
        ctx.repos.users.insert(&bia).await.unwrap();

        for name in ["casa", "mercado"] {
            let tag = Tag::new(ana.id.clone(), name.into(), String::new(), 0);
            ctx.repos.tags.insert(&tag).await.unwrap();
        }
        let foreign = Tag::new(bia.id.clone(), "trabalho".into(), String::new(), 0);
        ctx.repos.tags.insert(&foreign).await.unwrap();

        let mut usecase = GetTagsUseCase { user: ana };
        let tags = usecase.execute(&ctx).await.unwrap();
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|t| t.name != "trabalho"));
    }
}
