use super::ITagRepo;
use crate::repos::shared::inmemory_repo::*;
use tarefa_domain::{Tag, ID};

pub struct InMemoryTagRepo {
    tags: std::sync::Mutex<Vec<Tag>>,
}

impl InMemoryTagRepo {
    pub fn new() -> Self {
        Self {
            tags: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ITagRepo for InMemoryTagRepo {
    async fn insert(&self, tag: &Tag) -> anyhow::Result<()> {
        insert(tag, &self.tags);
        Ok(())
    }

    async fn save(&self, tag: &Tag) -> anyhow::Result<()> {
        save(tag, &self.tags);
        Ok(())
    }

    async fn delete(&self, tag_id: &ID) -> anyhow::Result<()> {
        delete(tag_id, &self.tags);
        Ok(())
    }

    async fn find(&self, tag_id: &ID) -> Option<Tag> {
        find(tag_id, &self.tags)
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Tag> {
        let mut tags = find_by(&self.tags, |t: &Tag| t.user_id == *user_id);
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    async fn find_many_by_user(&self, tag_ids: &[ID], user_id: &ID) -> Vec<Tag> {
        find_by(&self.tags, |t: &Tag| {
            t.user_id == *user_id && tag_ids.contains(&t.id)
        })
    }
}
