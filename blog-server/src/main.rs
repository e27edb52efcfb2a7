use std::time::Duration;

use anyhow::{Context, Result};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::mailer::build_mailer;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    let mailer = build_mailer(
        &settings.mail_backend,
        Duration::from_secs(settings.http_request_timeout_secs),
    )
    .context("failed to build mail transport")?;
    let state = AppState::from_pool(pool, mailer, &settings);

    server::run_http(&settings, state).await
}
