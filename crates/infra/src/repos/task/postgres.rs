use super::ITaskRepo;
use crate::repos::shared::query_structs::{SortOrder, TaskFindQuery, TaskSortBy};
use serde::Deserialize;
use sqlx::{types::Uuid, FromRow, PgPool, Postgres, QueryBuilder};
use tarefa_domain::{Tag, Task, ID};

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TASK_SELECT: &str = r#"
SELECT t.task_uid, t.user_uid, t.assigned_by_uid, t.title, t.description,
       t.task_type, t.priority, t.due_date, t.completed, t.created, t.updated,
       (SELECT json_agg(g.*) FROM tags AS g
            INNER JOIN task_tags AS tt ON tt.tag_uid = g.tag_uid
            WHERE tt.task_uid = t.task_uid) AS tags,
       (SELECT json_agg(s.user_uid) FROM task_shares AS s
            WHERE s.task_uid = t.task_uid) AS shared_with
FROM tasks AS t
"#;

#[derive(Debug, Deserialize)]
struct TagRaw {
    tag_uid: Uuid,
    user_uid: Uuid,
    name: String,
    color: String,
    created: i64,
    updated: i64,
}

impl From<TagRaw> for Tag {
    fn from(raw: TagRaw) -> Self {
        Self {
            id: raw.tag_uid.into(),
            user_id: raw.user_uid.into(),
            name: raw.name,
            color: raw.color,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    user_uid: Uuid,
    assigned_by_uid: Option<Uuid>,
    title: String,
    description: String,
    task_type: String,
    priority: String,
    due_date: Option<i64>,
    completed: bool,
    created: i64,
    updated: i64,
    tags: Option<serde_json::Value>,
    shared_with: Option<serde_json::Value>,
}

impl From<TaskRaw> for Task {
    fn from(raw: TaskRaw) -> Self {
        let tags: Vec<TagRaw> = match raw.tags {
            Some(json) => serde_json::from_value(json).unwrap_or_default(),
            None => vec![],
        };
        let shared_with: Vec<Uuid> = match raw.shared_with {
            Some(json) => serde_json::from_value(json).unwrap_or_default(),
            None => vec![],
        };
        Self {
            id: raw.task_uid.into(),
            user_id: raw.user_uid.into(),
            assigned_by: raw.assigned_by_uid.map(|uid| uid.into()),
            title: raw.title,
            description: raw.description,
            task_type: raw.task_type.parse().unwrap(),
            priority: raw.priority.parse().unwrap(),
            due_date: raw.due_date,
            completed: raw.completed,
            tags: tags.into_iter().map(|t| t.into()).collect(),
            shared_with: shared_with.into_iter().map(|uid| uid.into()).collect(),
            created: raw.created,
            updated: raw.updated,
        }
    }
}

fn push_filters(qb: &mut QueryBuilder<Postgres>, query: &TaskFindQuery) {
    qb.push(" WHERE (t.user_uid = ");
    qb.push_bind(*query.user_id.inner_ref());
    qb.push(" OR t.task_uid IN (SELECT task_uid FROM task_shares WHERE user_uid = ");
    qb.push_bind(*query.user_id.inner_ref());
    qb.push("))");

    if let Some(task_type) = query.task_type {
        qb.push(" AND t.task_type = ");
        qb.push_bind(task_type.as_str());
    }
    if let Some(completed) = query.completed {
        qb.push(" AND t.completed = ");
        qb.push_bind(completed);
    }
    if let Some(priority) = query.priority {
        qb.push(" AND t.priority = ");
        qb.push_bind(priority.as_str());
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{}%", search);
        qb.push(" AND (t.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR t.description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(from) = query.due_date_from {
        qb.push(" AND t.due_date >= ");
        qb.push_bind(from);
    }
    if let Some(to) = query.due_date_to {
        qb.push(" AND t.due_date <= ");
        qb.push_bind(to);
    }
    if let Some(assigned_by) = &query.assigned_by {
        qb.push(" AND t.assigned_by_uid = ");
        qb.push_bind(*assigned_by.inner_ref());
    }
    if !query.tag_ids.is_empty() {
        let tag_ids: Vec<Uuid> = query.tag_ids.iter().map(|id| *id.inner_ref()).collect();
        qb.push(" AND t.task_uid IN (SELECT task_uid FROM task_tags WHERE tag_uid = ANY(");
        qb.push_bind(tag_ids);
        qb.push("))");
    }
}

fn order_by_clause(query: &TaskFindQuery) -> String {
    let column = match query.sort_by {
        TaskSortBy::CreatedAt => "t.created",
        TaskSortBy::DueDate => "t.due_date",
        TaskSortBy::Title => "t.title",
        TaskSortBy::Priority => {
            "CASE t.priority WHEN 'baixa' THEN 0 WHEN 'media' THEN 1 WHEN 'alta' THEN 2 ELSE 3 END"
        }
    };
    let direction = match query.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!(" ORDER BY {} {}", column, direction)
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks
            (task_uid, user_uid, assigned_by_uid, title, description, task_type, priority, due_date, completed, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(task.user_id.inner_ref())
        .bind(task.assigned_by.as_ref().map(|id| *id.inner_ref()))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.task_type.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.completed)
        .bind(task.created)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;

        for tag in &task.tags {
            sqlx::query("INSERT INTO task_tags (task_uid, tag_uid) VALUES($1, $2)")
                .bind(task.id.inner_ref())
                .bind(tag.id.inner_ref())
                .execute(&self.pool)
                .await?;
        }
        for user_id in &task.shared_with {
            self.add_share(&task.id, user_id).await?;
        }

        Ok(())
    }

    async fn save(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2,
            description = $3,
            task_type = $4,
            priority = $5,
            due_date = $6,
            completed = $7,
            updated = $8
            WHERE task_uid = $1
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.task_type.as_str())
        .bind(task.priority.as_str())
        .bind(task.due_date)
        .bind(task.completed)
        .bind(task.updated)
        .execute(&self.pool)
        .await?;

        // Tag set is replaced wholesale on save
        sqlx::query("DELETE FROM task_tags WHERE task_uid = $1")
            .bind(task.id.inner_ref())
            .execute(&self.pool)
            .await?;
        for tag in &task.tags {
            sqlx::query("INSERT INTO task_tags (task_uid, tag_uid) VALUES($1, $2)")
                .bind(task.id.inner_ref())
                .bind(tag.id.inner_ref())
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }

    async fn delete(&self, task_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM tasks WHERE task_uid = $1")
            .bind(task_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> Option<Task> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(TASK_SELECT);
        qb.push(" WHERE t.task_uid = ");
        qb.push_bind(*task_id.inner_ref());

        qb.build_query_as::<TaskRaw>()
            .fetch_optional(&self.pool)
            .await
            .ok()
            .flatten()
            .map(|task| task.into())
    }

    async fn find_by_user(&self, query: TaskFindQuery) -> anyhow::Result<(Vec<Task>, usize)> {
        let mut count_qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT count(*) FROM tasks AS t");
        push_filters(&mut count_qb, &query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(TASK_SELECT);
        push_filters(&mut qb, &query);
        qb.push(order_by_clause(&query));
        qb.push(" LIMIT ");
        qb.push_bind(query.limit as i64);
        qb.push(" OFFSET ");
        qb.push_bind(query.skip as i64);

        let tasks: Vec<TaskRaw> = qb.build_query_as().fetch_all(&self.pool).await?;

        Ok((
            tasks.into_iter().map(|t| t.into()).collect(),
            total as usize,
        ))
    }

    async fn find_due_unfinished(&self) -> anyhow::Result<Vec<Task>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(TASK_SELECT);
        qb.push(" WHERE t.completed = false AND t.due_date IS NOT NULL");

        let tasks: Vec<TaskRaw> = qb.build_query_as().fetch_all(&self.pool).await?;
        Ok(tasks.into_iter().map(|t| t.into()).collect())
    }

    async fn find_upcoming_by_user(&self, user_id: &ID, limit: usize) -> Vec<Task> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(TASK_SELECT);
        qb.push(" WHERE t.user_uid = ");
        qb.push_bind(*user_id.inner_ref());
        qb.push(" AND t.completed = false AND t.due_date IS NOT NULL ORDER BY t.due_date ASC LIMIT ");
        qb.push_bind(limit as i64);

        qb.build_query_as::<TaskRaw>()
            .fetch_all(&self.pool)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.into())
            .collect()
    }

    async fn add_share(&self, task_id: &ID, user_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO task_shares (task_uid, user_uid)
            VALUES($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(task_id.inner_ref())
        .bind(user_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove_share(&self, task_id: &ID, user_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM task_shares WHERE task_uid = $1 AND user_uid = $2")
            .bind(task_id.inner_ref())
            .bind(user_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
