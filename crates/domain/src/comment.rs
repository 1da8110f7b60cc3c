use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: ID,
    pub task_id: ID,
    pub user_id: ID,
    pub content: String,
    pub created: i64,
    pub updated: i64,
}

impl Comment {
    pub fn new(task_id: ID, user_id: ID, content: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            task_id,
            user_id,
            content,
            created: now,
            updated: now,
        }
    }
}

impl Entity<ID> for Comment {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
