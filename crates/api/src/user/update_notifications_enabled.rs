use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::update_notifications_enabled::*;
use tarefa_domain::User;
use tarefa_infra::TarefaContext;

pub async fn update_notifications_enabled_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = UpdateNotificationsEnabledUseCase {
        user,
        notifications_enabled: body.0.notifications_enabled,
    };

    execute(usecase, &ctx)
        .await
        .map(|message| HttpResponse::Ok().json(APIResponse { message }))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct UpdateNotificationsEnabledUseCase {
    pub user: User,
    pub notifications_enabled: bool,
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
impl UseCase for UpdateNotificationsEnabledUseCase {
    type Response = String;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateNotificationsEnabled";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let mut user = self.user.clone();
        user.notifications_enabled = self.notifications_enabled;
        user.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .users
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let message = if self.notifications_enabled {
            "Notifications enabled".to_string()
        } else {
            "Notifications disabled".to_string()
        };
        Ok(message)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[actix_web::main]
    #[test]
    async fn it_toggles_the_flag() {
        let ctx = TarefaContext::create_inmemory();
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut disable = UpdateNotificationsEnabledUseCase {
            user: user.clone(),
            notifications_enabled: false,
        };
        let message = disable.execute(&ctx).await.unwrap();
        assert_eq!(message, "Notifications disabled");
        assert!(!ctx
            .repos
            .users
            .find(&user.id)
            .await
            .unwrap()
            .notifications_enabled);
    }
}
