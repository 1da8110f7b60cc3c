use super::ITaskRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::query_structs::{SortOrder, TaskFindQuery, TaskSortBy};
use tarefa_domain::{Task, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(vec![]),
        }
    }
}

fn matches(task: &Task, query: &TaskFindQuery) -> bool {
    if !task.is_visible_to(&query.user_id) {
        return false;
    }
    if let Some(task_type) = query.task_type {
        if task.task_type != task_type {
            return false;
        }
    }
    if let Some(completed) = query.completed {
        if task.completed != completed {
            return false;
        }
    }
    if let Some(priority) = query.priority {
        if task.priority != priority {
            return false;
        }
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        if !task.title.to_lowercase().contains(&needle)
            && !task.description.to_lowercase().contains(&needle)
        {
            return false;
        }
    }
    if let Some(from) = query.due_date_from {
        match task.due_date {
            Some(due) if due >= from => {}
            _ => return false,
        }
    }
    if let Some(to) = query.due_date_to {
        match task.due_date {
            Some(due) if due <= to => {}
            _ => return false,
        }
    }
    if let Some(assigned_by) = &query.assigned_by {
        if task.assigned_by.as_ref() != Some(assigned_by) {
            return false;
        }
    }
    if !query.tag_ids.is_empty()
        && !task
            .tags
            .iter()
            .any(|tag| query.tag_ids.contains(&tag.id))
    {
        return false;
    }
    true
}

fn sort_tasks(tasks: &mut [Task], sort_by: TaskSortBy, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let ordering = match sort_by {
            TaskSortBy::CreatedAt => a.created.cmp(&b.created),
            TaskSortBy::DueDate => a.due_date.cmp(&b.due_date),
            TaskSortBy::Title => a.title.cmp(&b.title),
            TaskSortBy::Priority => a.priority.rank().cmp(&b.priority.rank()),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks);
        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        save(task, &self.tasks);
        Ok(())
    }

    async fn delete(&self, task_id: &ID) -> anyhow::Result<()> {
        delete(task_id, &self.tasks);
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        find(task_id, &self.tasks)
    }

    async fn find_by_user(&self, query: TaskFindQuery) -> anyhow::Result<(Vec<Task>, usize)> {
        let mut tasks = find_by(&self.tasks, |t: &Task| matches(t, &query));
        sort_tasks(&mut tasks, query.sort_by, query.order);
        let total = tasks.len();
        let page = tasks
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .collect();
        Ok((page, total))
    }

    async fn find_due_unfinished(&self) -> anyhow::Result<Vec<Task>> {
        Ok(find_by(&self.tasks, |t: &Task| {
            !t.completed && t.due_date.is_some()
        }))
    }

    async fn find_upcoming_by_user(&self, user_id: &ID, limit: usize) -> Vec<Task> {
        let mut tasks = find_by(&self.tasks, |t: &Task| {
            t.user_id == *user_id && !t.completed && t.due_date.is_some()
        });
        tasks.sort_by_key(|t| t.due_date);
        tasks.into_iter().take(limit).collect()
    }

    async fn add_share(&self, task_id: &ID, user_id: &ID) -> anyhow::Result<()> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == *task_id) {
            if !task.shared_with.contains(user_id) {
                task.shared_with.push(user_id.clone());
            }
        }
        Ok(())
    }

    async fn remove_share(&self, task_id: &ID, user_id: &ID) -> anyhow::Result<()> {
        let mut tasks = self.tasks.lock().unwrap();
        if let Some(task) = tasks.iter_mut().find(|t| t.id == *task_id) {
            task.shared_with.retain(|uid| uid != user_id);
        }
        Ok(())
    }
}
