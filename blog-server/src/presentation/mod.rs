use std::sync::Arc;

use sqlx::PgPool;

use crate::application::blog_service::BlogService;
use crate::application::share_service::ShareService;
use crate::data::repositories::postgres::comment_repository::PostgresCommentRepository;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::infrastructure::mailer::Mailer;
use crate::infrastructure::settings::Settings;

pub(crate) mod http;

pub(crate) type PgBlogService = BlogService<PostgresPostRepository, PostgresCommentRepository>;
pub(crate) type PgShareService = ShareService<PostgresPostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) blog_service: Arc<PgBlogService>,
    pub(crate) share_service: Arc<PgShareService>,
}

impl AppState {
    pub(crate) fn new(blog_service: Arc<PgBlogService>, share_service: Arc<PgShareService>) -> Self {
        Self {
            blog_service,
            share_service,
        }
    }

    pub(crate) fn from_pool(pool: PgPool, mailer: Arc<dyn Mailer>, settings: &Settings) -> Self {
        let blog_service = BlogService::new(
            PostgresPostRepository::new(pool.clone()),
            PostgresCommentRepository::new(pool.clone()),
        );
        let share_service = ShareService::new(
            PostgresPostRepository::new(pool),
            mailer,
            settings.site_url.clone(),
            settings.mail_from.clone(),
        );

        Self::new(Arc::new(blog_service), Arc::new(share_service))
    }
}
