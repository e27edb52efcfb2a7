use std::time::Duration;

use axum::{Router, error_handling::HandleErrorLayer, http::StatusCode};
use tower::{BoxError, ServiceBuilder, timeout::error::Elapsed};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

use crate::infrastructure::settings::Settings;

pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .timeout(Duration::from_secs(settings.http_request_timeout_secs))
            .concurrency_limit(settings.http_concurrency_limit)
            .layer(RequestBodyLimitLayer::new(
                settings.http_request_body_limit_bytes,
            )),
    )
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<Elapsed>() {
        return (StatusCode::REQUEST_TIMEOUT, "request timed out".to_string());
    }

    warn!(error = %err, "request rejected by middleware");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        "service unavailable".to_string(),
    )
}
