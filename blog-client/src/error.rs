use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `blog-client`.
pub enum BlogClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Пост не найден или не опубликован.
    #[error("not found")]
    NotFound,

    /// Сервер не принимает этот HTTP-метод для данного адреса.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Некорректный запрос или неожиданный ответ сервера.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `blog-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::METHOD_NOT_ALLOWED => Self::MethodNotAllowed,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::BlogClientError;

    #[test]
    fn not_found_and_method_not_allowed_are_distinct() {
        assert!(matches!(
            BlogClientError::from_http_status(StatusCode::NOT_FOUND, None),
            BlogClientError::NotFound
        ));
        assert!(matches!(
            BlogClientError::from_http_status(StatusCode::METHOD_NOT_ALLOWED, None),
            BlogClientError::MethodNotAllowed
        ));
    }

    #[test]
    fn other_statuses_keep_server_message() {
        let err = BlogClientError::from_http_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            Some("internal error".to_string()),
        );
        match err {
            BlogClientError::InvalidRequest(message) => assert_eq!(message, "internal error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
