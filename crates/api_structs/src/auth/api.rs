use serde::{Deserialize, Serialize};
use tarefa_domain::User;

use crate::dtos::UserDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserDTO,
    pub token: String,
}

impl AuthResponse {
    pub fn new(user: User, token: String) -> Self {
        Self {
            user: UserDTO::new(user),
            token,
        }
    }
}

pub mod register {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    pub type APIResponse = AuthResponse;
}

pub mod login {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        /// Username or email address
        pub identifier: String,
        pub password: String,
    }

    pub type APIResponse = AuthResponse;
}
