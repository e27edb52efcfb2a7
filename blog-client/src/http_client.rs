use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{BlogClientError, BlogClientResult};
use crate::models::{CommentInput, CommentResult, PostDetail, PostPage, ShareInput, ShareResult};

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    error: Option<String>,
}

#[derive(Serialize)]
struct ListPostsQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<&'a str>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с JSON API `blog-server`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: reqwest::Response) -> BlogClientError {
        let status = response.status();

        let message = match response.json::<ErrorResponseDto>().await {
            Ok(body) => body
                .error
                .unwrap_or_else(|| format!("http status {status}")),
            Err(_) => format!("http status {status}"),
        };
        BlogClientError::from_http_status(status, Some(message))
    }

    /// отправляет запрос и декодирует json-ответ
    async fn execute<TRes>(&self, request: RequestBuilder) -> BlogClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let response = request
            .send()
            .await
            .map_err(BlogClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(BlogClientError::from_reqwest)
    }

    async fn send_json<TReq, TRes>(&self, path: &str, body: &TReq) -> BlogClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let request = self
            .client
            .request(Method::POST, self.endpoint(path))
            .json(body);
        self.execute(request).await
    }

    async fn get_json<TRes>(&self, path: &str) -> BlogClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = self.client.request(Method::GET, self.endpoint(path));
        self.execute(request).await
    }

    /// Возвращает страницу опубликованных постов.
    ///
    /// Номер страницы передаётся как есть: сервер сам приводит некорректные
    /// значения к первой странице, а слишком большие к последней.
    pub async fn list_posts(&self, page: Option<&str>) -> BlogClientResult<PostPage> {
        let request = self
            .client
            .request(Method::GET, self.endpoint("/blog/"))
            .query(&ListPostsQuery { page });
        self.execute(request).await
    }

    /// Получает пост по дате публикации и слагу вместе с активными комментариями.
    pub async fn get_post(
        &self,
        year: i32,
        month: u32,
        day: u32,
        slug: &str,
    ) -> BlogClientResult<PostDetail> {
        self.get_json(&post_detail_path(year, month, day, slug))
            .await
    }

    /// Получает пустую форму «поделиться» для поста.
    pub async fn share_form(&self, id: i64) -> BlogClientResult<ShareResult> {
        self.get_json(&format!("/blog/post/{id}/share/")).await
    }

    /// Отправляет форму «поделиться»; сервер отправляет письмо, если форма валидна.
    pub async fn share_post(&self, id: i64, input: &ShareInput) -> BlogClientResult<ShareResult> {
        self.send_json(&format!("/blog/post/{id}/share/"), input)
            .await
    }

    /// Оставляет комментарий к посту.
    pub async fn comment(&self, id: i64, input: &CommentInput) -> BlogClientResult<CommentResult> {
        self.send_json(&format!("/blog/post/{id}/comment/"), input)
            .await
    }
}

fn post_detail_path(year: i32, month: u32, day: u32, slug: &str) -> String {
    format!("/blog/{year}/{month}/{day}/{slug}/")
}
