use utoipa::OpenApi;

use crate::presentation::http::handlers::health::HealthzResponse;
use crate::presentation::http::handlers::posts::{
    CommentDto, CommentResponseDto, FormDto, FormFieldDto, FormSubmissionDto, ListPostsQuery,
    PostDetailDto, PostDto, PostPageDto, ShareResponseDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::health::healthz,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::post_detail,
        crate::presentation::http::handlers::posts::share_form,
        crate::presentation::http::handlers::posts::share_post,
        crate::presentation::http::handlers::posts::post_comment
    ),
    components(
        schemas(
            HealthzResponse,
            ListPostsQuery,
            FormSubmissionDto,
            PostDto,
            CommentDto,
            FormFieldDto,
            FormDto,
            PostPageDto,
            PostDetailDto,
            ShareResponseDto,
            CommentResponseDto
        )
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "posts", description = "Published posts"),
        (name = "share", description = "Recommend a post by email"),
        (name = "comments", description = "Reader comments")
    )
)]
pub(crate) struct ApiDoc;
