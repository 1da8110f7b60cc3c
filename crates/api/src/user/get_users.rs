use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::get_users::*;
use tarefa_domain::User;
use tarefa_infra::TarefaContext;

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

pub async fn get_users_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    protect_route(&http_req, &ctx).await?;

    let params = query_params.0;
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = params
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    let usecase = GetUsersUseCase { page, limit };

    execute(usecase, &ctx)
        .await
        .map(|(users, total)| HttpResponse::Ok().json(APIResponse::new(users, total, page, limit)))
        .map_err(TarefaError::from)
}

/// Public listing used when picking somebody to assign or share a task with
#[derive(Debug)]
pub struct GetUsersUseCase {
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUsersUseCase {
    type Response = (Vec<User>, usize);

    type Error = UseCaseError;

    const NAME: &'static str = "GetUsers";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .users
            .find_all((self.page - 1) * self.limit, self.limit)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_pages_through_all_users() {
        let ctx = TarefaContext::create_inmemory();
        for i in 0..12 {
            let user = User::new(
                format!("user{}", i),
                format!("user{}@example.com", i),
                "hash".into(),
                i,
            );
            ctx.repos.users.insert(&user).await.unwrap();
        }

        let mut first_page = GetUsersUseCase { page: 1, limit: 10 };
        let (users, total) = first_page.execute(&ctx).await.unwrap();
        assert_eq!(users.len(), 10);
        assert_eq!(total, 12);

        let mut second_page = GetUsersUseCase { page: 2, limit: 10 };
        let (users, _) = second_page.execute(&ctx).await.unwrap();
        assert_eq!(users.len(), 2);
    }
}
