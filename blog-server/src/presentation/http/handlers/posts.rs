use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::blog_service::{CommentOutcome, ListPostsResult, PostDetail};
use crate::application::share_service::ShareOutcome;
use crate::domain::comment::Comment;
use crate::domain::form::FormState;
use crate::domain::post::Post;
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ListPostsQuery {
    /// Raw page number; anything invalid is clamped, never rejected.
    pub(crate) page: Option<String>,
}

/// Submitted form fields as a flat JSON object of strings.
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct FormSubmissionDto(pub(crate) HashMap<String, String>);

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) slug: String,
    pub(crate) author_id: i64,
    pub(crate) body: String,
    pub(crate) publish: DateTime<Utc>,
    pub(crate) created: DateTime<Utc>,
    pub(crate) updated: DateTime<Utc>,
    pub(crate) status: String,
    pub(crate) url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentDto {
    pub(crate) id: i64,
    pub(crate) post_id: i64,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) body: String,
    pub(crate) created: DateTime<Utc>,
    pub(crate) active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FormFieldDto {
    pub(crate) name: String,
    pub(crate) kind: String,
    pub(crate) required: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FormDto {
    pub(crate) name: String,
    pub(crate) fields: Vec<FormFieldDto>,
    pub(crate) data: BTreeMap<String, String>,
    pub(crate) errors: BTreeMap<String, Vec<String>>,
    pub(crate) is_bound: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostPageDto {
    pub(crate) posts: Vec<PostDto>,
    pub(crate) number: u32,
    pub(crate) num_pages: u32,
    pub(crate) per_page: u32,
    pub(crate) total: u64,
    pub(crate) has_previous: bool,
    pub(crate) has_next: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDetailDto {
    pub(crate) post: PostDto,
    pub(crate) comments: Vec<CommentDto>,
    pub(crate) form: FormDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ShareResponseDto {
    pub(crate) post: PostDto,
    pub(crate) form: FormDto,
    pub(crate) sent: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct CommentResponseDto {
    pub(crate) post: PostDto,
    pub(crate) form: FormDto,
    pub(crate) comment: Option<CommentDto>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        let url = post.absolute_path();
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            author_id: post.author_id,
            body: post.body,
            publish: post.publish,
            created: post.created,
            updated: post.updated,
            status: post.status.to_string(),
            url,
        }
    }
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
            created: comment.created,
            active: comment.active,
        }
    }
}

impl From<FormState> for FormDto {
    fn from(form: FormState) -> Self {
        Self {
            name: form.schema.name.to_string(),
            fields: form
                .schema
                .fields
                .iter()
                .map(|field| FormFieldDto {
                    name: field.name.to_string(),
                    kind: field.kind.as_str().to_string(),
                    required: field.required,
                })
                .collect(),
            data: form.data,
            errors: form.errors,
            is_bound: form.is_bound,
        }
    }
}

impl From<ListPostsResult> for PostPageDto {
    fn from(page: ListPostsResult) -> Self {
        let has_previous = page.has_previous();
        let has_next = page.has_next();
        Self {
            posts: page.items.into_iter().map(PostDto::from).collect(),
            number: page.number,
            num_pages: page.num_pages,
            per_page: page.per_page,
            total: page.total,
            has_previous,
            has_next,
        }
    }
}

impl From<PostDetail> for PostDetailDto {
    fn from(detail: PostDetail) -> Self {
        Self {
            post: detail.post.into(),
            comments: detail.comments.into_iter().map(CommentDto::from).collect(),
            form: detail.form.into(),
        }
    }
}

impl From<ShareOutcome> for ShareResponseDto {
    fn from(outcome: ShareOutcome) -> Self {
        Self {
            post: outcome.post.into(),
            form: outcome.form.into(),
            sent: outcome.sent,
        }
    }
}

impl From<CommentOutcome> for CommentResponseDto {
    fn from(outcome: CommentOutcome) -> Self {
        Self {
            post: outcome.post.into(),
            form: outcome.form.into(),
            comment: outcome.comment.map(CommentDto::from),
        }
    }
}

// Path segments that are not numbers never match a post. Handlers parse them
// before looking at the body, so an unknown id is 404 whatever was submitted.
fn parse_segment<T: FromStr>(raw: &str) -> AppResult<T> {
    raw.parse().map_err(|_| AppError::NotFound)
}

#[utoipa::path(
    get,
    path = "/blog/",
    tag = "posts",
    params(
        ("page" = Option<String>, Query, description = "Page number, 1-based; invalid values fall back to 1, large ones to the last page")
    ),
    responses(
        (status = 200, description = "Page of published posts", body = PostPageDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListPostsQuery>,
) -> AppResult<(StatusCode, Json<PostPageDto>)> {
    let result = state.blog_service.list_posts(query.page.as_deref()).await?;

    Ok((StatusCode::OK, Json(PostPageDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/blog/{year}/{month}/{day}/{slug}/",
    tag = "posts",
    params(
        ("year" = i32, Path, description = "Publish year"),
        ("month" = u32, Path, description = "Publish month"),
        ("day" = u32, Path, description = "Publish day"),
        ("slug" = String, Path, description = "Post slug")
    ),
    responses(
        (status = 200, description = "Post with its active comments", body = PostDetailDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn post_detail(
    State(state): State<AppState>,
    Path((year, month, day, slug)): Path<(String, String, String, String)>,
) -> AppResult<(StatusCode, Json<PostDetailDto>)> {
    let year = parse_segment(&year)?;
    let month = parse_segment(&month)?;
    let day = parse_segment(&day)?;

    let result = state
        .blog_service
        .get_post_detail(year, month, day, &slug)
        .await?;

    Ok((StatusCode::OK, Json(PostDetailDto::from(result))))
}

#[utoipa::path(
    get,
    path = "/blog/post/{id}/share/",
    tag = "share",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Empty share form", body = ShareResponseDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn share_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<ShareResponseDto>)> {
    let id = parse_segment(&id)?;
    let result = state.share_service.share_form(id).await?;

    Ok((StatusCode::OK, Json(ShareResponseDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/blog/post/{id}/share/",
    tag = "share",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = FormSubmissionDto,
    responses(
        (status = 200, description = "Form processed; `sent` tells whether the email went out", body = ShareResponseDto),
        (status = 400, description = "Body is not a JSON object of strings"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn share_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: Result<Json<FormSubmissionDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ShareResponseDto>)> {
    let id = parse_segment(&id)?;
    let Json(submission) = submission?;
    let result = state.share_service.share_post(id, submission.0).await?;

    Ok((StatusCode::OK, Json(ShareResponseDto::from(result))))
}

#[utoipa::path(
    post,
    path = "/blog/post/{id}/comment/",
    tag = "comments",
    params(
        ("id" = i64, Path, description = "Post id")
    ),
    request_body = FormSubmissionDto,
    responses(
        (status = 201, description = "Comment created", body = CommentResponseDto),
        (status = 200, description = "Form rejected, field errors attached", body = CommentResponseDto),
        (status = 400, description = "Body is not a JSON object of strings"),
        (status = 404, description = "Post not found"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn post_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    submission: Result<Json<FormSubmissionDto>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CommentResponseDto>)> {
    let id = parse_segment(&id)?;
    let Json(submission) = submission?;
    let result = state.blog_service.add_comment(id, submission.0).await?;

    let status = if result.comment.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(CommentResponseDto::from(result))))
}
