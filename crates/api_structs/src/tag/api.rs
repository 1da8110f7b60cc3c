use serde::{Deserialize, Serialize};
use tarefa_domain::{Tag, ID};

use crate::dtos::TagDTO;

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagResponse {
    pub tag: TagDTO,
}

impl TagResponse {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag: TagDTO::new(tag),
        }
    }
}

pub mod create_tag {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        #[serde(default)]
        pub color: Option<String>,
    }

    pub type APIResponse = TagResponse;
}

pub mod get_tags {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub tags: Vec<TagDTO>,
    }

    impl APIResponse {
        pub fn new(tags: Vec<Tag>) -> Self {
            Self {
                tags: tags.into_iter().map(TagDTO::new).collect(),
            }
        }
    }
}

pub mod get_tag {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tag_id: ID,
    }

    pub type APIResponse = TagResponse;
}

pub mod update_tag {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tag_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub color: Option<String>,
    }

    pub type APIResponse = TagResponse;
}

pub mod delete_tag {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub tag_id: ID,
    }

    pub type APIResponse = TagResponse;
}
