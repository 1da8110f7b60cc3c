use crate::shared::entity::{Entity, ID};

/// A user-scoped label that can be attached to any number of the owner's
/// tasks. `color` is a hex code like `#FF5733`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    pub color: String,
    pub created: i64,
    pub updated: i64,
}

impl Tag {
    pub fn new(user_id: ID, name: String, color: String, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name,
            color,
            created: now,
            updated: now,
        }
    }
}

impl Entity<ID> for Tag {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
