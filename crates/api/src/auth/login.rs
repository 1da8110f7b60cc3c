use crate::error::TarefaError;
use crate::shared::{
    auth::{create_token, verify_password},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tarefa_api_structs::login::*;
use tarefa_domain::User;
use tarefa_infra::TarefaContext;

pub async fn login_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let body = body.0;
    let usecase = LoginUseCase {
        identifier: body.identifier,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|(user, token)| HttpResponse::Ok().json(APIResponse::new(user, token)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct LoginUseCase {
    /// Username or email address
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidCredentials,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid credentials".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = (User, String);

    type Error = UseCaseError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let user = ctx
            .repos
            .users
            .find_by_username_or_email(&self.identifier)
            .await
            .ok_or(UseCaseError::InvalidCredentials)?;

        if !verify_password(&self.password, &user.password_hash) {
            return Err(UseCaseError::InvalidCredentials);
        }

        let token = create_token(&user, ctx).map_err(|_| UseCaseError::StorageError)?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::register::RegisterUseCase;

    async fn setup() -> TarefaContext {
        let ctx = TarefaContext::create_inmemory();
        let mut register = RegisterUseCase {
            username: "joao".into(),
            email: "joao@example.com".into(),
            password: "senha-segura".into(),
        };
        register.execute(&ctx).await.expect("To register user");
        ctx
    }

    #[actix_web::main]
    #[test]
    async fn it_logs_in_with_username_or_email() {
        let ctx = setup().await;

        for identifier in ["joao", "joao@example.com"] {
            let mut usecase = LoginUseCase {
                identifier: identifier.into(),
                password: "senha-segura".into(),
            };
            let (user, token) = usecase.execute(&ctx).await.expect("To log in");
            assert_eq!(user.username, "joao");
            assert!(!token.is_empty());
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_wrong_password_and_unknown_user() {
        let ctx = setup().await;

        let mut wrong_password = LoginUseCase {
            identifier: "joao".into(),
            password: "senha-errada".into(),
        };
        assert_eq!(
            wrong_password.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidCredentials
        );

        let mut unknown = LoginUseCase {
            identifier: "ninguem".into(),
            password: "senha-segura".into(),
        };
        assert_eq!(
            unknown.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidCredentials
        );
    }
}
