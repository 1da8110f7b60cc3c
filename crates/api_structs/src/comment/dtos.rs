use serde::{Deserialize, Serialize};
use tarefa_domain::{Comment, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDTO {
    pub id: ID,
    pub task_id: ID,
    pub user_id: ID,
    pub content: String,
    pub created: i64,
    pub updated: i64,
}

impl CommentDTO {
    pub fn new(comment: Comment) -> Self {
        Self {
            id: comment.id,
            task_id: comment.task_id,
            user_id: comment.user_id,
            content: comment.content,
            created: comment.created,
            updated: comment.updated,
        }
    }
}
