use serde::{Deserialize, Serialize};
use tarefa_domain::{Comment, ID};

use crate::dtos::CommentDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment: CommentDTO,
}

impl CommentResponse {
    pub fn new(comment: Comment) -> Self {
        Self {
            comment: CommentDTO::new(comment),
        }
    }
}

pub mod create_comment {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub task_id: ID,
        pub content: String,
    }

    pub type APIResponse = CommentResponse;
}

pub mod get_comments {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub task_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub comments: Vec<CommentDTO>,
    }

    impl APIResponse {
        pub fn new(comments: Vec<Comment>) -> Self {
            Self {
                comments: comments.into_iter().map(CommentDTO::new).collect(),
            }
        }
    }
}

pub mod get_comment {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub comment_id: ID,
    }

    pub type APIResponse = CommentResponse;
}

pub mod update_comment {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub comment_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub content: String,
    }

    pub type APIResponse = CommentResponse;
}

pub mod delete_comment {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub comment_id: ID,
    }

    pub type APIResponse = CommentResponse;
}
