use async_trait::async_trait;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewComment {
    pub(crate) post_id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) body: String,
}

#[async_trait]
pub(crate) trait CommentRepository: Send + Sync {
    /// Active comments of a post, oldest first.
    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError>;
    /// Inserts an active comment.
    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError>;
}
