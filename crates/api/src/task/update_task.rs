use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::update_task::*;
use tarefa_domain::{Priority, Task, TaskType, User, ID};
use tarefa_infra::TarefaContext;

pub async fn update_task_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateTaskUseCase {
        user,
        task_id: path_params.task_id.clone(),
        title: body.title,
        description: body.description,
        task_type: body.task_type,
        priority: body.priority,
        due_date: body.due_date,
        completed: body.completed,
        tag_ids: body.tag_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Ok().json(APIResponse::new(task)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct UpdateTaskUseCase {
    pub user: User,
    pub task_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<TaskType>,
    pub priority: Option<Priority>,
    pub due_date: Option<i64>,
    pub completed: Option<bool>,
    /// `None` keeps the current tags, `Some(vec![])` clears them
    pub tag_ids: Option<Vec<ID>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden,
    TagsNotFound,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(task_id) => {
                Self::NotFound(format!("The task with id: {}, was not found.", task_id))
            }
            UseCaseError::Forbidden => {
                Self::Forbidden("Only the task owner can modify the task".into())
            }
            UseCaseError::TagsNotFound => Self::BadClientData(
                "One or more tags not found or don't belong to the user".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateTask";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let mut task = ctx
            .repos
            .tasks
            .find(&self.task_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.task_id.clone()))?;

        if task.user_id != self.user.id {
            return Err(UseCaseError::Forbidden);
        }

        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(task_type) = self.task_type {
            task.task_type = task_type;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(tag_ids) = &self.tag_ids {
            if tag_ids.is_empty() {
                task.tags = Vec::new();
            } else {
                // Tag ownership follows the task owner
                let tags = ctx
                    .repos
                    .tags
                    .find_many_by_user(tag_ids, &task.user_id)
                    .await;
                if tags.len() != tag_ids.len() {
                    return Err(UseCaseError::TagsNotFound);
                }
                task.tags = tags;
            }
        }
        task.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .tasks
            .save(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn empty_update(user: User, task_id: ID) -> UpdateTaskUseCase {
        UpdateTaskUseCase {
            user,
            task_id,
            title: None,
            description: None,
            task_type: None,
            priority: None,
            due_date: None,
            completed: None,
            tag_ids: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn owner_can_complete_a_task() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        let task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut usecase = empty_update(owner, task.id.clone());
        usecase.completed = Some(true);
        usecase.priority = Some(Priority::Urgente);

        let updated = usecase.execute(&ctx).await.expect("To update task");
        assert!(updated.completed);
        assert_eq!(updated.priority, Priority::Urgente);

        let stored = ctx.repos.tasks.find(&task.id).await.unwrap();
        assert!(stored.completed);
    }

    #[actix_web::main]
    #[test]
    async fn shared_user_cannot_modify() {
        let ctx = TarefaContext::create_inmemory();
        let owner = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        let friend = User::new("bia".into(), "bia@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&owner).await.unwrap();
        ctx.repos.users.insert(&friend).await.unwrap();

        let mut task = Task::new(owner.id.clone(), "tarefa".into(), TaskType::Casa, 0);
        task.shared_with.push(friend.id.clone());
        ctx.repos.tasks.insert(&task).await.unwrap();

        let mut usecase = empty_update(friend, task.id.clone());
        usecase.completed = Some(true);

        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::Forbidden
        );
    }
}
