use super::ITagRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tarefa_domain::{Tag, ID};

pub struct PostgresTagRepo {
    pool: PgPool,
}

impl PostgresTagRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
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

#[async_trait::async_trait]
impl ITagRepo for PostgresTagRepo {
    async fn insert(&self, tag: &Tag) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tags
            (tag_uid, user_uid, name, color, created, updated)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(tag.id.inner_ref())
        .bind(tag.user_id.inner_ref())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(tag.created)
        .bind(tag.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, tag: &Tag) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE tags
            SET name = $2,
            color = $3,
            updated = $4
            WHERE tag_uid = $1
            "#,
        )
        .bind(tag.id.inner_ref())
        .bind(&tag.name)
        .bind(&tag.color)
        .bind(tag.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, tag_id: &ID) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM tags WHERE tag_uid = $1")
            .bind(tag_id.inner_ref())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, tag_id: &ID) -> Option<Tag> {
        sqlx::query_as::<_, TagRaw>(
            r#"
            SELECT * FROM tags AS g
            WHERE g.tag_uid = $1
            "#,
        )
        .bind(tag_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|tag| tag.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> Vec<Tag> {
        sqlx::query_as::<_, TagRaw>(
            r#"
            SELECT * FROM tags AS g
            WHERE g.user_uid = $1
            ORDER BY g.name ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|tag| tag.into())
        .collect()
    }

    async fn find_many_by_user(&self, tag_ids: &[ID], user_id: &ID) -> Vec<Tag> {
        let tag_ids: Vec<Uuid> = tag_ids.iter().map(|id| *id.inner_ref()).collect();
        sqlx::query_as::<_, TagRaw>(
            r#"
            SELECT * FROM tags AS g
            WHERE g.tag_uid = ANY($1) AND g.user_uid = $2
            "#,
        )
        .bind(&tag_ids)
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|tag| tag.into())
        .collect()
    }
}
