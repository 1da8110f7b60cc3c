use serde::{Deserialize, Serialize};
use tarefa_domain::{Tag, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDTO {
    pub id: ID,
    pub name: String,
    pub color: String,
}

impl TagDTO {
    pub fn new(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            color: tag.color,
        }
    }
}
