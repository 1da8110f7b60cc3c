use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use tarefa_api_structs::create_task::*;
use tarefa_domain::{Priority, Task, TaskType, User, ID};
use tarefa_infra::TarefaContext;

pub async fn create_task_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let creator = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateTaskUseCase {
        creator,
        title: body.title,
        description: body.description.unwrap_or_default(),
        task_type: body.task_type,
        priority: body.priority,
        due_date: body.due_date,
        assign_to: body.user_id,
        tag_ids: body.tag_ids.unwrap_or_default(),
    };

    execute(usecase, &ctx)
        .await
        .map(|task| HttpResponse::Created().json(APIResponse::new(task)))
        .map_err(TarefaError::from)
}

#[derive(Debug)]
pub struct CreateTaskUseCase {
    pub creator: User,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub priority: Option<Priority>,
    pub due_date: Option<i64>,
    /// When set, the task is created for this user and shared back with
    /// the creator
    pub assign_to: Option<ID>,
    pub tag_ids: Vec<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidInput(String),
    AssigneeNotFound(ID),
    TagsNotFound,
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidInput(msg) => Self::BadClientData(msg),
            UseCaseError::AssigneeNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::TagsNotFound => Self::BadClientData(
                "One or more tags not found or don't belong to the user".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateTaskUseCase {
    type Response = Task;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateTask";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        if self.title.trim().is_empty() {
            return Err(UseCaseError::InvalidInput("title is required".into()));
        }

        // Tasks may be created for somebody else; both then keep access
        let owner_id = match &self.assign_to {
            Some(assignee_id) if *assignee_id != self.creator.id => {
                if ctx.repos.users.find(assignee_id).await.is_none() {
                    return Err(UseCaseError::AssigneeNotFound(assignee_id.clone()));
                }
                assignee_id.clone()
            }
            _ => self.creator.id.clone(),
        };

        let tags = if self.tag_ids.is_empty() {
            Vec::new()
        } else {
            let tags = ctx
                .repos
                .tags
                .find_many_by_user(&self.tag_ids, &owner_id)
                .await;
            if tags.len() != self.tag_ids.len() {
                return Err(UseCaseError::TagsNotFound);
            }
            tags
        };

        let now = ctx.sys.get_timestamp_millis();
        let mut task = Task::new(owner_id.clone(), self.title.clone(), self.task_type, now);
        task.description = self.description.clone();
        task.priority = self.priority.unwrap_or_default();
        task.due_date = self.due_date;
        task.tags = tags;
        if owner_id != self.creator.id {
            task.assigned_by = Some(self.creator.id.clone());
            task.shared_with.push(self.creator.id.clone());
        }

        ctx.repos
            .tasks
            .insert(&task)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(task)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::Tag;

    struct TestContext {
        ctx: TarefaContext,
        creator: User,
    }

    async fn setup() -> TestContext {
        let ctx = TarefaContext::create_inmemory();
        let creator = User::new(
            "maria".into(),
            "maria@example.com".into(),
            "hash".into(),
            0,
        );
        ctx.repos.users.insert(&creator).await.unwrap();
        TestContext { ctx, creator }
    }

    #[actix_web::main]
    #[test]
    async fn it_creates_a_task_for_the_creator() {
        let TestContext { ctx, creator } = setup().await;

        let mut usecase = CreateTaskUseCase {
            creator: creator.clone(),
            title: "limpar a casa".into(),
            description: String::new(),
            task_type: TaskType::Casa,
            priority: None,
            due_date: None,
            assign_to: None,
            tag_ids: vec![],
        };

        let task = usecase.execute(&ctx).await.expect("To create task");
        assert_eq!(task.user_id, creator.id);
        assert_eq!(task.priority, Priority::Media);
        assert!(task.assigned_by.is_none());
        assert!(ctx.repos.tasks.find(&task.id).await.is_some());
    }

    #[actix_web::main]
    #[test]
    async fn assigning_to_another_user_shares_back_with_the_creator() {
        let TestContext { ctx, creator } = setup().await;
        let assignee = User::new("joao".into(), "joao@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&assignee).await.unwrap();

        let mut usecase = CreateTaskUseCase {
            creator: creator.clone(),
            title: "preparar relatório".into(),
            description: String::new(),
            task_type: TaskType::Trabalho,
            priority: Some(Priority::Alta),
            due_date: None,
            assign_to: Some(assignee.id.clone()),
            tag_ids: vec![],
        };

        let task = usecase.execute(&ctx).await.expect("To create task");
        assert_eq!(task.user_id, assignee.id);
        assert_eq!(task.assigned_by, Some(creator.id.clone()));
        assert!(task.shared_with.contains(&creator.id));
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_unknown_assignee_and_foreign_tags() {
        let TestContext { ctx, creator } = setup().await;

        let mut unknown_assignee = CreateTaskUseCase {
            creator: creator.clone(),
            title: "tarefa".into(),
            description: String::new(),
            task_type: TaskType::Casa,
            priority: None,
            due_date: None,
            assign_to: Some(ID::new()),
            tag_ids: vec![],
        };
        assert!(matches!(
            unknown_assignee.execute(&ctx).await.unwrap_err(),
            UseCaseError::AssigneeNotFound(_)
        ));

        // A tag owned by somebody else must be rejected
        let other = User::new("outro".into(), "outro@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&other).await.unwrap();
        let foreign_tag = Tag::new(other.id.clone(), "urgente".into(), "#FF0000".into(), 0);
        ctx.repos.tags.insert(&foreign_tag).await.unwrap();

        let mut foreign_tags = CreateTaskUseCase {
            creator,
            title: "tarefa".into(),
            description: String::new(),
            task_type: TaskType::Casa,
            priority: None,
            due_date: None,
            assign_to: None,
            tag_ids: vec![foreign_tag.id.clone()],
        };
        assert_eq!(
            foreign_tags.execute(&ctx).await.unwrap_err(),
            UseCaseError::TagsNotFound
        );
    }
}
