use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::data::post_repository::{Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDateSlug, PostStatus};

const SELECT_POSTS: &str = r#"
    SELECT
        id,
        title,
        slug,
        author_id,
        body,
        publish,
        created,
        updated,
        status
    FROM posts"#;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    slug: String,
    author_id: i64,
    body: String,
    publish: DateTime<Utc>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    status: String,
}

/// Appends the `WHERE` clause shared by every reader-facing post query.
pub(crate) fn push_published_filter(builder: &mut QueryBuilder<'_, Postgres>, now: DateTime<Utc>) {
    builder
        .push(" WHERE status = ")
        .push_bind(PostStatus::Published.as_str())
        .push(" AND publish <= ")
        .push_bind(now);
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError> {
        let limit = i64::from(pagination.page_size);
        let offset = i64::from(pagination.page.saturating_sub(1)) * limit;

        let mut builder = QueryBuilder::new(SELECT_POSTS);
        push_published_filter(&mut builder, now);
        builder
            .push(" ORDER BY publish DESC, id DESC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows = builder
            .build_query_as::<PostRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn count_published(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM posts");
        push_published_filter(&mut builder, now);

        let count: i64 = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn find_published_by_date_slug(
        &self,
        now: DateTime<Utc>,
        key: &PostDateSlug,
    ) -> Result<Option<Post>, DomainError> {
        let Some((day_start, day_end)) = key.day_range() else {
            return Ok(None);
        };

        let mut builder = QueryBuilder::new(SELECT_POSTS);
        push_published_filter(&mut builder, now);
        builder
            .push(" AND slug = ")
            .push_bind(key.slug.clone())
            .push(" AND publish >= ")
            .push_bind(day_start)
            .push(" AND publish < ")
            .push_bind(day_end)
            .push(" LIMIT 1");

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn find_published_by_id(
        &self,
        now: DateTime<Utc>,
        id: i64,
    ) -> Result<Option<Post>, DomainError> {
        let mut builder = QueryBuilder::new(SELECT_POSTS);
        push_published_filter(&mut builder, now);
        builder.push(" AND id = ").push_bind(id);

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Ok(Post {
        id: row.id,
        title: row.title,
        slug: row.slug,
        author_id: row.author_id,
        body: row.body,
        publish: row.publish,
        created: row.created,
        updated: row.updated,
        status: row.status.parse()?,
    })
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sqlx::{Execute, Postgres, QueryBuilder};

    use super::{SELECT_POSTS, push_published_filter};

    #[test]
    fn published_filter_binds_status_and_cutoff() {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_POSTS);
        push_published_filter(&mut builder, Utc::now());
        builder.push(" AND id = ").push_bind(1_i64);

        let query = builder.build();
        let sql = query.sql();
        assert!(sql.ends_with("WHERE status = $1 AND publish <= $2 AND id = $3"));
    }
}
