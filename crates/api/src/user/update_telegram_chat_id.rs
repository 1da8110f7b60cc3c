use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::update_telegram_chat_id::*;
use tarefa_domain::User;
use tarefa_infra::TarefaContext;

pub async fn update_telegram_chat_id_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateTelegramChatIdUseCase {
        user,
        telegram_chat_id: body.0.telegram_chat_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|message| HttpResponse::Ok().json(APIResponse { message }))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct UpdateTelegramChatIdUseCase {
    pub user: User,
    pub telegram_chat_id: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidChatId,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidChatId => Self::BadClientData(
                "telegram_chat_id must be a numeric string (e.g., '123456789'). \
                 For group chats, it can be negative (e.g., '-123456789')"
                    .into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

/// Numeric string, optionally with a leading `-` for group chats
fn is_valid_chat_id(chat_id: &str) -> bool {
    let digits = chat_id.strip_prefix('-').unwrap_or(chat_id);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTelegramChatIdUseCase {
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTelegramChatId";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        if let Some(chat_id) = self.telegram_chat_id.as_deref() {
            if !chat_id.is_empty() && !is_valid_chat_id(chat_id) {
                return Err(UseCaseError::InvalidChatId);
            }
        }

        let mut user = self.user.clone();
        user.telegram_chat_id = self.telegram_chat_id.clone().filter(|id| !id.is_empty());
        user.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .users
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let message = if user.telegram_chat_id.is_none() {
            "Telegram chat ID removed successfully".to_string()
        } else {
            "Telegram chat ID updated successfully. \
             Make sure you've sent a message to the bot first!"
                .to_string()
        };
        Ok(message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn setup() -> (TarefaContext, User) {
        let ctx = TarefaContext::create_inmemory();
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        (ctx, user)
    }

    #[actix_web::main]
    #[test]
    async fn it_accepts_numeric_and_group_chat_ids() {
        let (ctx, user) = setup().await;

        for chat_id in ["123456789", "-987654321"] {
            let mut usecase = UpdateTelegramChatIdUseCase {
                user: user.clone(),
                telegram_chat_id: Some(chat_id.into()),
            };
            usecase.execute(&ctx).await.expect("To update chat id");
            let stored = ctx.repos.users.find(&user.id).await.unwrap();
            assert_eq!(stored.telegram_chat_id.as_deref(), Some(chat_id));
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_non_numeric_chat_ids() {
        let (ctx, user) = setup().await;

        for chat_id in ["abc", "12a4", "-", "12-34"] {
            let mut usecase = UpdateTelegramChatIdUseCase {
                user: user.clone(),
                telegram_chat_id: Some(chat_id.into()),
            };
            assert_eq!(
                usecase.execute(&ctx).await.unwrap_err(),
                UseCaseError::InvalidChatId,
                "chat id {:?} should be rejected",
                chat_id
            );
        }
    }

    #[actix_web::main]
    #[test]
    async fn null_removes_the_chat_id() {
        let (ctx, mut user) = setup().await;
        user.telegram_chat_id = Some("123".into());
        ctx.repos.users.save(&user).await.unwrap();

        let mut usecase = UpdateTelegramChatIdUseCase {
            user: user.clone(),
            telegram_chat_id: None,
        };
        let message = usecase.execute(&ctx).await.unwrap();
        assert!(message.contains("removed"));
        let stored = ctx.repos.users.find(&user.id).await.unwrap();
        assert!(stored.telegram_chat_id.is_none());
    }
}
