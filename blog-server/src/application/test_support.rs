use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{Pagination, PostRepository};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDateSlug, PostStatus};
use crate::infrastructure::mailer::{EmailMessage, MailError, Mailer};

#[derive(Clone, Default)]
pub(crate) struct FakePostRepo {
    posts: Arc<Mutex<Vec<Post>>>,
}

impl FakePostRepo {
    pub(crate) fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
        }
    }

    fn visible(&self, now: DateTime<Utc>) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .filter(|post| post.is_visible(now))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.publish.cmp(&a.publish).then(b.id.cmp(&a.id)));
        posts
    }
}

#[async_trait]
impl PostRepository for FakePostRepo {
    async fn list_published(
        &self,
        now: DateTime<Utc>,
        pagination: Pagination,
    ) -> Result<Vec<Post>, DomainError> {
        let size = pagination.page_size as usize;
        let offset = pagination.page.saturating_sub(1) as usize * size;
        Ok(self.visible(now).into_iter().skip(offset).take(size).collect())
    }

    async fn count_published(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        Ok(self.visible(now).len() as u64)
    }

    async fn find_published_by_date_slug(
        &self,
        now: DateTime<Utc>,
        key: &PostDateSlug,
    ) -> Result<Option<Post>, DomainError> {
        Ok(self.visible(now).into_iter().find(|post| key.matches(post)))
    }

    async fn find_published_by_id(
        &self,
        now: DateTime<Utc>,
        id: i64,
    ) -> Result<Option<Post>, DomainError> {
        Ok(self.visible(now).into_iter().find(|post| post.id == id))
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeCommentRepo {
    pub(crate) comments: Arc<Mutex<Vec<Comment>>>,
}

impl FakeCommentRepo {
    pub(crate) fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            comments: Arc::new(Mutex::new(comments)),
        }
    }

    pub(crate) fn all(&self) -> Vec<Comment> {
        self.comments
            .lock()
            .expect("comments mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl CommentRepository for FakeCommentRepo {
    async fn list_active_for_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .all()
            .into_iter()
            .filter(|comment| comment.post_id == post_id && comment.active)
            .collect())
    }

    async fn create_comment(&self, input: NewComment) -> Result<Comment, DomainError> {
        let mut comments = self.comments.lock().expect("comments mutex poisoned");
        let now = Utc::now();
        let comment = Comment {
            id: comments.len() as i64 + 1,
            post_id: input.post_id,
            name: input.name,
            email: input.email,
            body: input.body,
            created: now,
            updated: now,
            active: true,
        };
        comments.push(comment.clone());
        Ok(comment)
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeMailer {
    pub(crate) sent: Arc<Mutex<Vec<EmailMessage>>>,
    pub(crate) fail: bool,
}

impl FakeMailer {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        self.sent
            .lock()
            .expect("sent mutex poisoned")
            .push(message.clone());
        if self.fail {
            return Err(MailError::Rejected(reqwest::StatusCode::BAD_GATEWAY));
        }
        Ok(())
    }
}

pub(crate) fn sample_post(id: i64, slug: &str, status: PostStatus, publish: DateTime<Utc>) -> Post {
    Post {
        id,
        title: format!("Post {id}"),
        slug: slug.to_string(),
        author_id: 1,
        body: format!("Body of post {id}"),
        publish,
        created: publish,
        updated: publish,
        status,
    }
}

/// Published post `days` days in the past.
pub(crate) fn published_days_ago(id: i64, days: i64) -> Post {
    sample_post(
        id,
        &format!("post-{id}"),
        PostStatus::Published,
        Utc::now() - Duration::days(days),
    )
}

pub(crate) fn sample_comment(id: i64, post_id: i64, active: bool) -> Comment {
    let now = Utc::now();
    Comment {
        id,
        post_id,
        name: format!("reader {id}"),
        email: format!("reader{id}@example.com"),
        body: format!("comment {id}"),
        created: now,
        updated: now,
        active,
    }
}
