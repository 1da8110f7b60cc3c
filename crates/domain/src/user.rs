use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
    /// PHC-formatted argon2id hash, never the plaintext password
    pub password_hash: String,
    /// Telegram chat the user wants reminders delivered to. The user must
    /// have messaged the bot at least once for sends to succeed.
    pub telegram_chat_id: Option<String>,
    pub notifications_enabled: bool,
    pub created: i64,
    pub updated: i64,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            username,
            email,
            password_hash,
            telegram_chat_id: None,
            notifications_enabled: true,
            created: now,
            updated: now,
        }
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
