use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    name: String,
    email: String,
    body: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    active: bool,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            name: row.name,
            email: row.email,
            body: row.body,
            created: row.created,
            updated: row.updated,
            active: row.active,
        }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                id,
                post_id,
                name,
                email,
                body,
                created,
                updated,
                active
            FROM comments
            WHERE post_id = $1 AND active = TRUE
            ORDER BY created ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, name, email, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, post_id, name, email, body, created, updated, active
            "#,
        )
        .bind(input.post_id)
        .bind(input.name)
        .bind(input.email)
        .bind(input.body)
        .fetch_one(&self.pool)
        .await
        .map_err(map_comment_db_error)?;

        Ok(Comment::from(row))
    }
}

fn map_comment_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("post".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
