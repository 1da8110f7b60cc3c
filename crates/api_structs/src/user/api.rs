use serde::{Deserialize, Serialize};
use tarefa_domain::User;

use crate::dtos::UserDTO;

pub mod get_users {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        #[serde(default)]
        pub page: Option<usize>,
        #[serde(default)]
        pub limit: Option<usize>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub users: Vec<UserDTO>,
        pub total: usize,
        pub page: usize,
        pub limit: usize,
        pub total_pages: usize,
    }

    impl APIResponse {
        pub fn new(users: Vec<User>, total: usize, page: usize, limit: usize) -> Self {
            Self {
                users: users.into_iter().map(UserDTO::new).collect(),
                total,
                page,
                limit,
                total_pages: total.div_ceil(limit.max(1)),
            }
        }
    }
}

pub mod update_telegram_chat_id {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Numeric chat id string; may start with `-` for group chats.
        /// `null` removes the configured chat.
        pub telegram_chat_id: Option<String>,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}

pub mod update_notifications_enabled {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub notifications_enabled: bool,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub message: String,
    }
}
