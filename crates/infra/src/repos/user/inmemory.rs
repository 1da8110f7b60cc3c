use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use tarefa_domain::{User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        insert(user, &self.users);
        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        save(user, &self.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.users)
    }

    async fn find_by_username_or_email(&self, identifier: &str) -> Option<User> {
        let mut users = find_by(&self.users, |u: &User| {
            u.username == identifier || u.email == identifier
        });
        if users.is_empty() {
            return None;
        }
        Some(users.remove(0))
    }

    async fn exists_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> anyhow::Result<bool> {
        Ok(!find_by(&self.users, |u: &User| {
            u.username == username || u.email == email
        })
        .is_empty())
    }

    async fn find_all(&self, skip: usize, limit: usize) -> anyhow::Result<(Vec<User>, usize)> {
        let mut users = self.users.lock().unwrap().clone();
        users.sort_by_key(|u| u.created);
        let total = users.len();
        let page = users.into_iter().skip(skip).take(limit).collect();
        Ok((page, total))
    }
}
