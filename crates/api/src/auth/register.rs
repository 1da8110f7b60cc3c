use crate::error::TarefaError;
use crate::shared::{
    auth::{create_token, hash_password},
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tarefa_api_structs::register::*;
use tarefa_domain::User;
use tarefa_infra::TarefaContext;

pub async fn register_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let body = body.0;
    let usecase = RegisterUseCase {
        username: body.username,
        email: body.email,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|(user, token)| HttpResponse::Created().json(APIResponse::new(user, token)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct RegisterUseCase {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidInput(String),
    UserAlreadyExists,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::UserAlreadyExists => {
                Self::Conflict("A user with that username or email already exists".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterUseCase {
    type Response = (User, String);

    type Error = UseCaseError;

    const NAME: &'static str = "Register";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        if self.username.trim().is_empty() {
            return Err(UseCaseError::InvalidInput("username is required".into()));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(UseCaseError::InvalidInput(
                "a valid email address is required".into(),
            ));
        }
        if self.password.len() < 6 {
            return Err(UseCaseError::InvalidInput(
                "password must be at least 6 characters long".into(),
            ));
        }

        let exists = ctx
            .repos
            .users
            .exists_by_username_or_email(&self.username, &self.email)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if exists {
            return Err(UseCaseError::UserAlreadyExists);
        }

        let password_hash =
            hash_password(&self.password).map_err(|_| UseCaseError::StorageError)?;
        let user = User::new(
            self.username.clone(),
            self.email.clone(),
            password_hash,
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .users
            .insert(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let token = create_token(&user, ctx).map_err(|_| UseCaseError::StorageError)?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_registers_a_new_user() {
        let ctx = TarefaContext::create_inmemory();

        let mut usecase = RegisterUseCase {
            username: "maria".into(),
            email: "maria@example.com".into(),
            password: "senha-segura".into(),
        };

        let (user, token) = usecase.execute(&ctx).await.expect("To register user");
        assert_eq!(user.username, "maria");
        assert!(user.notifications_enabled);
        assert!(!token.is_empty());
        assert_ne!(user.password_hash, "senha-segura");
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_duplicate_username_or_email() {
        let ctx = TarefaContext::create_inmemory();

        let mut first = RegisterUseCase {
            username: "maria".into(),
            email: "maria@example.com".into(),
            password: "senha-segura".into(),
        };
        first.execute(&ctx).await.expect("To register user");

        let mut same_username = RegisterUseCase {
            username: "maria".into(),
            email: "outra@example.com".into(),
            password: "senha-segura".into(),
        };
        assert_eq!(
            same_username.execute(&ctx).await.unwrap_err(),
            UseCaseError::UserAlreadyExists
        );

        let mut same_email = RegisterUseCase {
            username: "outra".into(),
            email: "maria@example.com".into(),
            password: "senha-segura".into(),
        };
        assert_eq!(
            same_email.execute(&ctx).await.unwrap_err(),
            UseCaseError::UserAlreadyExists
        );
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_invalid_input() {
        let ctx = TarefaContext::create_inmemory();

        let mut bad_email = RegisterUseCase {
            username: "maria".into(),
            email: "not-an-email".into(),
            password: "senha-segura".into(),
        };
        assert!(matches!(
            bad_email.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidInput(_)
        ));

        let mut short_password = RegisterUseCase {
            username: "maria".into(),
            email: "maria@example.com".into(),
            password: "123".into(),
        };
        assert!(matches!(
            short_password.execute(&ctx).await.unwrap_err(),
            UseCaseError::InvalidInput(_)
        ));
    }
}
