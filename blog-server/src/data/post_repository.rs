use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDateSlug};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Pagination {
    pub(crate) page: u32,
    pub(crate) page_size: u32,
}

/// Read access to posts. Every lookup only sees posts visible at `now`
/// (published, publish timestamp not in the future).
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError>;
    async fn count_published(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
    async fn find_published_by_date_slug(
        &self,
        now: DateTime<Utc>,
        key: &PostDateSlug,
    ) -> Result<Option<Post>, DomainError>;
    async fn find_published_by_id(
        &self,
        now: DateTime<Utc>,
        id: i64,
    ) -> Result<Option<Post>, DomainError>;

    /// Like `find_published_by_id`, but a missing post is `NotFound`.
    async fn get_published_by_id(&self, now: DateTime<Utc>, id: i64) -> Result<Post, DomainError> {
        self.find_published_by_id(now, id)
            .await?
            .filter(|post| post.is_visible(now))
            .ok_or_else(|| DomainError::NotFound(format!("post id: {id}")))
    }
}
