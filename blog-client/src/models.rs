use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Опубликованный пост.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Слаг, уникальный в пределах дня публикации.
    pub slug: String,
    /// Идентификатор автора.
    pub author_id: i64,
    /// Текст поста.
    pub body: String,
    /// Дата и время публикации (UTC).
    pub publish: DateTime<Utc>,
    /// Дата и время создания (UTC).
    pub created: DateTime<Utc>,
    /// Дата и время последнего изменения (UTC).
    pub updated: DateTime<Utc>,
    /// Статус (`published`).
    pub status: String,
    /// Канонический путь страницы поста.
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Комментарий к посту.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Идентификатор поста.
    pub post_id: i64,
    /// Имя автора комментария.
    pub name: String,
    /// Email автора комментария.
    pub email: String,
    /// Текст комментария.
    pub body: String,
    /// Дата и время создания (UTC).
    pub created: DateTime<Utc>,
    /// Показывается ли комментарий.
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Состояние формы: отправленные значения и ошибки по полям.
pub struct Form {
    /// Имя формы (`EmailPostForm`, `CommentForm`).
    pub name: String,
    /// Отправленные значения полей.
    pub data: BTreeMap<String, String>,
    /// Ошибки валидации по имени поля.
    pub errors: BTreeMap<String, Vec<String>>,
    /// Была ли форма отправлена.
    pub is_bound: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Страница списка постов.
pub struct PostPage {
    /// Посты на текущей странице (не более трёх).
    pub posts: Vec<Post>,
    /// Номер текущей страницы, начиная с 1.
    pub number: u32,
    /// Всего страниц.
    pub num_pages: u32,
    /// Размер страницы.
    pub per_page: u32,
    /// Всего опубликованных постов.
    pub total: u64,
    /// Есть ли предыдущая страница.
    pub has_previous: bool,
    /// Есть ли следующая страница.
    pub has_next: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Пост с активными комментариями.
pub struct PostDetail {
    /// Пост.
    pub post: Post,
    /// Активные комментарии в порядке добавления.
    pub comments: Vec<Comment>,
    /// Пустая форма комментария.
    pub form: Form,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Результат запроса формы «поделиться» или её отправки.
pub struct ShareResult {
    /// Пост.
    pub post: Post,
    /// Форма с ошибками, если они есть.
    pub form: Form,
    /// Было ли отправлено письмо.
    pub sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Результат отправки комментария.
pub struct CommentResult {
    /// Пост.
    pub post: Post,
    /// Форма с ошибками, если они есть.
    pub form: Form,
    /// Созданный комментарий; `None`, если форма не прошла валидацию.
    pub comment: Option<Comment>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Поля формы «поделиться постом по email».
pub struct ShareInput {
    /// Имя отправителя.
    pub name: String,
    /// Email отправителя.
    pub email: String,
    /// Email получателя.
    pub to: String,
    /// Необязательный комментарий.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
/// Поля формы комментария.
pub struct CommentInput {
    /// Имя автора.
    pub name: String,
    /// Email автора.
    pub email: String,
    /// Текст комментария.
    pub body: String,
}
