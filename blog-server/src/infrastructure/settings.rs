use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    /// Messages are written to the log instead of being delivered.
    Console,
    /// Messages are POSTed as JSON to a relay endpoint.
    Http { relay_url: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub http_addr: String,
    pub site_url: String,
    pub mail_from: String,
    pub mail_backend: MailBackend,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let database_max_connections = u32::try_from(parse_usize_env("DATABASE_MAX_CONNECTIONS", 10)?)
            .context("DATABASE_MAX_CONNECTIONS is too large")?;

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let site_url = std::env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if site_url.is_empty() {
            return Err(anyhow!("SITE_URL must not be empty"));
        }

        let mail_from = std::env::var("MAIL_FROM").unwrap_or_else(|_| "blog@localhost".to_string());
        let mail_backend = parse_mail_backend(
            &std::env::var("MAIL_BACKEND").unwrap_or_else(|_| "console".to_string()),
        )?;

        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let http_request_body_limit_bytes =
            parse_usize_env("HTTP_REQUEST_BODY_LIMIT_BYTES", 1024 * 1024)?;
        let http_concurrency_limit = parse_usize_env("HTTP_CONCURRENCY_LIMIT", 256)?;
        let http_request_timeout_secs = parse_u64_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            database_url,
            database_max_connections,
            http_addr,
            site_url,
            mail_from,
            mail_backend,
            cors_origins,
            log_level,
            http_request_body_limit_bytes,
            http_concurrency_limit,
            http_request_timeout_secs,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_mail_backend(raw: &str) -> Result<MailBackend> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "console" => Ok(MailBackend::Console),
        "http" => {
            let relay_url = get_required("MAIL_RELAY_URL")
                .context("MAIL_RELAY_URL is required when MAIL_BACKEND=http")?;
            Ok(MailBackend::Http { relay_url })
        }
        other => Err(anyhow!(
            "unknown MAIL_BACKEND '{other}', expecting 'console' or 'http'"
        )),
    }
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize_env(key: &str, default: usize) -> Result<usize> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<usize>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

fn parse_u64_env(key: &str, default: u64) -> Result<u64> {
    let value = std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{MailBackend, parse_cors_origins, parse_mail_backend};

    #[test]
    fn cors_origins_skip_blank_entries() {
        let origins = parse_cors_origins(" http://a.test , ,http://b.test,".to_string());
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn console_mail_backend_needs_no_relay() {
        let backend = parse_mail_backend(" Console ").expect("console must parse");
        assert_eq!(backend, MailBackend::Console);
    }

    #[test]
    fn unknown_mail_backend_is_rejected() {
        assert!(parse_mail_backend("smtp").is_err());
    }
}
