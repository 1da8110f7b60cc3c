use super::ICommentRepo;
use crate::repos::shared::inmemory_repo::*;
use tarefa_domain::{Comment, ID};

pub struct InMemoryCommentRepo {
    comments: std::sync::Mutex<Vec<Comment>>,
}

impl InMemoryCommentRepo {
    pub fn new() -> Self {
        Self {
            comments: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl ICommentRepo for InMemoryCommentRepo {
    async fn insert(&self, comment: &Comment) -> anyhow::Result<()> {
        insert(comment, &self.comments);
        Ok(())
    }

    async fn save(&self, comment: &Comment) -> anyhow::Result<()> {
        save(comment, &self.comments);
        Ok(())
    }

    async fn delete(&self, comment_id: &ID) -> anyhow::Result<()> {
        delete(comment_id, &self.comments);
        Ok(())
    }

    async fn find(&self, comment_id: &ID) -> Option<Comment> {
        find(comment_id, &self.comments)
    }

    async fn find_by_task(&self, task_id: &ID) -> Vec<Comment> {
        let mut comments = find_by(&self.comments, |c: &Comment| c.task_id == *task_id);
        comments.sort_by_key(|c| c.created);
        comments
    }
}
