use chrono::Utc;
use tracing::{debug, info};

use crate::data::comment_repository::{CommentRepository, NewComment};
use crate::data::post_repository::{Pagination, PostRepository};
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::form::{COMMENT_FORM, CommentForm, FieldErrors, FormState, RawForm};
use crate::domain::pagination::{POSTS_PER_PAGE, Page, Paginator};
use crate::domain::post::{Post, PostDateSlug};

pub(crate) type ListPostsResult = Page<Post>;

#[derive(Debug, Clone)]
pub(crate) struct PostDetail {
    pub(crate) post: Post,
    pub(crate) comments: Vec<Comment>,
    pub(crate) form: FormState,
}

#[derive(Debug, Clone)]
pub(crate) struct CommentOutcome {
    pub(crate) post: Post,
    pub(crate) form: FormState,
    pub(crate) comment: Option<Comment>,
}

pub(crate) struct BlogService<P: PostRepository, C: CommentRepository> {
    posts: P,
    comments: C,
}

impl<P: PostRepository, C: CommentRepository> BlogService<P, C> {
    pub(crate) fn new(posts: P, comments: C) -> Self {
        Self { posts, comments }
    }

    pub(crate) async fn list_posts(
        &self,
        raw_page: Option<&str>,
    ) -> Result<ListPostsResult, DomainError> {
        let now = Utc::now();
        let total = self.posts.count_published(now).await?;
        let paginator = Paginator::new(POSTS_PER_PAGE, total);
        let page = paginator.resolve_page(raw_page);

        if raw_page.is_some_and(|raw| raw.trim() != page.to_string()) {
            debug!(requested = ?raw_page, page, "page parameter clamped");
        }

        let pagination = Pagination {
            page,
            page_size: paginator.per_page(),
        };
        let posts = self.posts.list_published(now, pagination).await?;

        Ok(Page {
            items: posts,
            number: page,
            num_pages: paginator.num_pages(),
            per_page: paginator.per_page(),
            total: paginator.total(),
        })
    }

    pub(crate) async fn get_post_detail(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> Result<PostDetail, DomainError> {
        let not_found = || DomainError::NotFound(format!("post {year}/{month}/{day}/{slug}"));

        let key = PostDateSlug::from_parts(year, month, day, slug).ok_or_else(not_found)?;
        let now = Utc::now();
        let post = self
            .posts
            .find_published_by_date_slug(now, &key)
            .await?
            .filter(|post| post.is_visible(now) && key.matches(post))
            .ok_or_else(not_found)?;

        let comments = self.comments.list_active_for_post(post.id).await?;

        Ok(PostDetail {
            post,
            comments,
            form: FormState::unbound(COMMENT_FORM),
        })
    }

    pub(crate) async fn add_comment(
        &self,
        post_id: i64,
        raw: RawForm,
    ) -> Result<CommentOutcome, DomainError> {
        let post = self.posts.get_published_by_id(Utc::now(), post_id).await?;

        let form = match CommentForm::validate(&raw) {
            Ok(form) => form,
            Err(errors) => {
                debug!(post_id, fields = ?errors.keys().collect::<Vec<_>>(), "comment form rejected");
                return Ok(CommentOutcome {
                    post,
                    form: FormState::bound(COMMENT_FORM, &raw, errors),
                    comment: None,
                });
            }
        };

        let comment = self
            .comments
            .create_comment(NewComment {
                post_id: post.id,
                name: form.name,
                email: form.email,
                body: form.body,
            })
            .await?;
        info!(post_id, comment_id = comment.id, "comment created");

        Ok(CommentOutcome {
            post,
            form: FormState::bound(COMMENT_FORM, &raw, FieldErrors::new()),
            comment: Some(comment),
        })
    }
}
