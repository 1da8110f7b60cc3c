use serde::{Deserialize, Serialize};
use tarefa_domain::{User, ID};

/// Public view of a user, safe to return to any authenticated caller
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub username: String,
    pub email: String,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}
