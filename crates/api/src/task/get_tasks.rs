use crate::error::TarefaError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{Datelike, Duration};
use tarefa_api_structs::get_tasks::*;
use tarefa_domain::{
    local_date_of_millis, local_date_start_millis, local_day_bounds_millis, Task, User, ID,
};
use tarefa_infra::{SortOrder, TarefaContext, TaskFindQuery, TaskSortBy};

const DEFAULT_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

pub async fn get_tasks_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = build_usecase(user, query_params.0, &ctx, false);

    execute(usecase, &ctx)
        .await
        .map(|(tasks, total, page, limit)| {
            HttpResponse::Ok().json(APIResponse::new(tasks, total, page, limit))
        })
        .map_err(TarefaError::from)
}

/// Tasks the caller created for other users, to follow up on them
pub async fn get_assigned_tasks_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TarefaContext>,
) -> Result<HttpResponse, TarefaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = build_usecase(user, query_params.0, &ctx, true);

    execute(usecase, &ctx)
        .await
        .map(|(tasks, total, page, limit)| {
            HttpResponse::Ok().json(APIResponse::new(tasks, total, page, limit))
        })
        .map_err(TarefaError::from)
}

fn build_usecase(
    user: User,
    params: QueryParams,
    ctx: &TarefaContext,
    assigned_only: bool,
) -> GetTasksUseCase {
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let limit = params
        .limit
        .filter(|l| *l > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    let mut query = TaskFindQuery::for_user(user.id.clone());
    query.task_type = params.task_type;
    query.completed = params.completed;
    query.priority = params.priority;
    query.search = params.search.filter(|s| !s.is_empty());
    query.skip = (page - 1) * limit;
    query.limit = limit;

    if let Some(period) = params.period.as_deref() {
        apply_period(&mut query, period, ctx.sys.get_timestamp_millis());
    }
    // Explicit bounds override the period shortcut
    if params.due_date_from.is_some() {
        query.due_date_from = params.due_date_from;
    }
    if params.due_date_to.is_some() {
        query.due_date_to = params.due_date_to;
    }

    if assigned_only {
        query.assigned_by = Some(user.id.clone());
    } else {
        query.assigned_by = params.assigned_by;
    }

    if let Some(tag_ids) = params.tag_ids.as_deref() {
        query.tag_ids = tag_ids
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .filter_map(|id| id.trim().parse::<ID>().ok())
            .collect();
    }

    query.sort_by = match params.sort_by.as_deref() {
        Some("due_date") => TaskSortBy::DueDate,
        Some("title") => TaskSortBy::Title,
        Some("priority") => TaskSortBy::Priority,
        _ => TaskSortBy::CreatedAt,
    };
    query.order = match params.order.as_deref() {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    GetTasksUseCase { query, page, limit }
}

fn apply_period(query: &mut TaskFindQuery, period: &str, now: i64) {
    let (today_start, today_end) = local_day_bounds_millis(now);
    let today = local_date_of_millis(now);
    match period {
        "overdue" => {
            query.due_date_to = Some(now);
            query.completed = Some(false);
        }
        "today" => {
            query.due_date_from = Some(today_start);
            query.due_date_to = Some(today_end);
        }
        "this_week" => {
            let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
            query.due_date_from = Some(local_date_start_millis(week_start));
            query.due_date_to = Some(local_date_start_millis(week_start + Duration::days(7)));
        }
        "this_month" => {
            let month_start = today.with_day(1).unwrap_or(today);
            let next_month = if month_start.month() == 12 {
                month_start
                    .with_year(month_start.year() + 1)
                    .and_then(|d| d.with_month(1))
            } else {
                month_start.with_month(month_start.month() + 1)
            };
            query.due_date_from = Some(local_date_start_millis(month_start));
            if let Some(next_month) = next_month {
                query.due_date_to = Some(local_date_start_millis(next_month));
            }
        }
        _ => {}
    }
}

#[derive(Debug)]
pub struct GetTasksUseCase {
    pub query: TaskFindQuery,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TarefaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetTasksUseCase {
    type Response = (Vec<Task>, usize, usize, usize);

    type Error = UseCaseError;

    const NAME: &'static str = "GetTasks";

    async fn execute(&mut self, ctx: &TarefaContext) -> Result<Self::Response, Self::Error> {
        let (tasks, total) = ctx
            .repos
            .tasks
            .find_by_user(self.query.clone())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok((tasks, total, self.page, self.limit))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tarefa_domain::{Priority, TaskType};

    struct TestContext {
        ctx: TarefaContext,
        user: User,
    }

    async fn setup() -> TestContext {
        let ctx = TarefaContext::create_inmemory();
        let user = User::new("ana".into(), "ana@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&user).await.unwrap();
        TestContext { ctx, user }
    }

    async fn insert_task(
        ctx: &TarefaContext,
        user: &User,
        title: &str,
        task_type: TaskType,
        completed: bool,
        created: i64,
    ) -> Task {
        let mut task = Task::new(user.id.clone(), title.into(), task_type, created);
        task.completed = completed;
        ctx.repos.tasks.insert(&task).await.unwrap();
        task
    }

    #[actix_web::main]
    #[test]
    async fn it_filters_by_type_and_completion() {
        let TestContext { ctx, user } = setup().await;
        insert_task(&ctx, &user, "lavar louça", TaskType::Casa, false, 1).await;
        insert_task(&ctx, &user, "enviar email", TaskType::Trabalho, false, 2).await;
        insert_task(&ctx, &user, "correr", TaskType::Saude, true, 3).await;

        let mut query = TaskFindQuery::for_user(user.id.clone());
        query.task_type = Some(TaskType::Trabalho);
        let mut usecase = GetTasksUseCase {
            query,
            page: 1,
            limit: 10,
        };
        let (tasks, total, ..) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(tasks[0].title, "enviar email");

        let mut query = TaskFindQuery::for_user(user.id.clone());
        query.completed = Some(false);
        let mut usecase = GetTasksUseCase {
            query,
            page: 1,
            limit: 10,
        };
        let (_, total, ..) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(total, 2);
    }

    #[actix_web::main]
    #[test]
    async fn it_searches_title_and_description_case_insensitively() {
        let TestContext { ctx, user } = setup().await;
        insert_task(&ctx, &user, "Comprar presentes", TaskType::Lazer, false, 1).await;
        let mut with_description =
            Task::new(user.id.clone(), "outra".into(), TaskType::Casa, 2);
        with_description.description = "lista de PRESENTES de natal".into();
        ctx.repos.tasks.insert(&with_description).await.unwrap();
        insert_task(&ctx, &user, "sem relação", TaskType::Casa, false, 3).await;

        let mut query = TaskFindQuery::for_user(user.id.clone());
        query.search = Some("presentes".into());
        let mut usecase = GetTasksUseCase {
            query,
            page: 1,
            limit: 10,
        };
        let (_, total, ..) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(total, 2);
    }

    #[actix_web::main]
    #[test]
    async fn it_paginates_and_reports_the_total() {
        let TestContext { ctx, user } = setup().await;
        for i in 0..25 {
            insert_task(&ctx, &user, &format!("tarefa {}", i), TaskType::Casa, false, i).await;
        }

        let mut query = TaskFindQuery::for_user(user.id.clone());
        query.skip = 20;
        query.limit = 10;
        query.order = SortOrder::Asc;
        let mut usecase = GetTasksUseCase {
            query,
            page: 3,
            limit: 10,
        };
        let (tasks, total, page, limit) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(total, 25);
        assert_eq!(tasks.len(), 5);
        assert_eq!(page, 3);
        assert_eq!(limit, 10);
    }

    #[actix_web::main]
    #[test]
    async fn it_sorts_by_priority_rank() {
        let TestContext { ctx, user } = setup().await;
        for (title, priority) in [
            ("baixa", Priority::Baixa),
            ("urgente", Priority::Urgente),
            ("media", Priority::Media),
        ] {
            let mut task = Task::new(user.id.clone(), title.into(), TaskType::Casa, 0);
            task.priority = priority;
            ctx.repos.tasks.insert(&task).await.unwrap();
        }

        let mut query = TaskFindQuery::for_user(user.id.clone());
        query.sort_by = TaskSortBy::Priority;
        query.order = SortOrder::Desc;
        let mut usecase = GetTasksUseCase {
            query,
            page: 1,
            limit: 10,
        };
        let (tasks, ..) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(tasks[0].title, "urgente");
        assert_eq!(tasks[2].title, "baixa");
    }

    #[actix_web::main]
    #[test]
    async fn shared_tasks_appear_in_the_listing() {
        let TestContext { ctx, user } = setup().await;
        let other = User::new("beto".into(), "beto@example.com".into(), "hash".into(), 0);
        ctx.repos.users.insert(&other).await.unwrap();

        let mut shared = Task::new(other.id.clone(), "compartilhada".into(), TaskType::Casa, 1);
        shared.shared_with.push(user.id.clone());
        ctx.repos.tasks.insert(&shared).await.unwrap();
        insert_task(&ctx, &other, "privada", TaskType::Casa, false, 2).await;

        let query = TaskFindQuery::for_user(user.id.clone());
        let mut usecase = GetTasksUseCase {
            query,
            page: 1,
            limit: 10,
        };
        let (tasks, total, ..) = usecase.execute(&ctx).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(tasks[0].title, "compartilhada");
    }
}
