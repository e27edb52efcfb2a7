//! Клиентская библиотека для работы с blog-server по HTTP.
//!
//! Предоставляет `BlogClient` поверх JSON API сервера: список постов
//! с пагинацией, страницу поста с комментариями, отправку поста по email
//! и добавление комментариев.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{
    Comment, CommentInput, CommentResult, Form, Post, PostDetail, PostPage, ShareInput,
    ShareResult,
};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент для работы с блог-сервисом.
pub struct BlogClient {
    http_client: HttpClient,
}

impl BlogClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(base_url)?,
        })
    }

    /// Возвращает страницу опубликованных постов (по три на страницу).
    pub async fn list_posts(&self, page: Option<&str>) -> BlogClientResult<PostPage> {
        self.http_client.list_posts(page).await
    }

    /// Получает опубликованный пост по дате и слагу.
    ///
    /// Возвращает `BlogClientError::NotFound`, если такого поста нет.
    pub async fn get_post(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> BlogClientResult<PostDetail> {
        self.http_client.get_post(year, month, day, slug).await
    }

    /// Получает пустую форму «поделиться» для поста.
    pub async fn share_form(&self, id: i64) -> BlogClientResult<ShareResult> {
        self.http_client.share_form(id).await
    }

    /// Делится постом по email.
    ///
    /// Ошибки валидации не считаются ошибкой запроса: они возвращаются в
    /// `ShareResult::form.errors`, а `sent` остаётся `false`.
    pub async fn share_post(&self, id: i64, input: &ShareInput) -> BlogClientResult<ShareResult> {
        self.http_client.share_post(id, input).await
    }

    /// Добавляет комментарий к посту.
    ///
    /// Если форма не прошла валидацию, `CommentResult::comment` равен `None`.
    pub async fn comment(&self, id: i64, input: &CommentInput) -> BlogClientResult<CommentResult> {
        self.http_client.comment(id, input).await
    }
}
