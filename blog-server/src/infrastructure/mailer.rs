use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::infrastructure::settings::MailBackend;

const RELAY_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RELAY_MAX_TIMEOUT: Duration = Duration::from_secs(15);

/// Total budget for one relay call: half the request timeout, capped.
///
/// Always strictly below `request_timeout`, so a stalled relay cannot
/// outlive the request that triggered it.
pub(crate) fn relay_timeout(request_timeout: Duration) -> Duration {
    (request_timeout / 2).min(RELAY_MAX_TIMEOUT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct EmailMessage {
    pub(crate) subject: String,
    pub(crate) body: String,
    pub(crate) from: String,
    pub(crate) to: Vec<String>,
}

#[derive(Debug, Error)]
pub(crate) enum MailError {
    #[error("mail relay request failed: {0}")]
    Relay(#[from] reqwest::Error),

    #[error("mail relay rejected message: http status {0}")]
    Rejected(reqwest::StatusCode),
}

/// Synchronous, single-attempt delivery of one message.
#[async_trait]
pub(crate) trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError>;
}

/// Writes messages to the log. Nothing leaves the process.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        info!(
            subject = %message.subject,
            from = %message.from,
            to = ?message.to,
            body = %message.body,
            "email message"
        );
        Ok(())
    }
}

/// Hands messages to an HTTP mail relay as a JSON document.
#[derive(Debug, Clone)]
pub(crate) struct HttpRelayMailer {
    relay_url: String,
    client: Client,
}

impl HttpRelayMailer {
    pub(crate) fn new(relay_url: impl Into<String>, timeout: Duration) -> Result<Self, MailError> {
        let client = Client::builder()
            .connect_timeout(RELAY_CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            relay_url: relay_url.into(),
            client,
        })
    }
}

#[async_trait]
impl Mailer for HttpRelayMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailError> {
        let response = self
            .client
            .post(&self.relay_url)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected(status));
        }
        Ok(())
    }
}

pub(crate) fn build_mailer(
    backend: &MailBackend,
    request_timeout: Duration,
) -> Result<Arc<dyn Mailer>, MailError> {
    let mailer: Arc<dyn Mailer> = match backend {
        MailBackend::Console => Arc::new(ConsoleMailer),
        MailBackend::Http { relay_url } => Arc::new(HttpRelayMailer::new(
            relay_url.clone(),
            relay_timeout(request_timeout),
        )?),
    };
    Ok(mailer)
}
