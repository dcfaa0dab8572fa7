use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use shared::{commands::SESSION_HEADER, protocol::ResponseEnvelope};
use tracing::debug;

use crate::{error::ClientError, session::SessionToken};

/// Sends one command and returns the decoded envelope.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        command: &str,
        session: &SessionToken,
    ) -> Result<ResponseEnvelope, ClientError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        endpoint: &str,
        command: &str,
        session: &SessionToken,
    ) -> Result<ResponseEnvelope, ClientError> {
        let transport_err = |source| ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        debug!(endpoint, command, "sending command");
        let body = self
            .http
            .post(endpoint)
            .header(SESSION_HEADER, session.as_str())
            .body(command.to_string())
            .send()
            .await
            .map_err(transport_err)?
            .error_for_status()
            .map_err(transport_err)?
            .bytes()
            .await
            .map_err(transport_err)?;

        ResponseEnvelope::from_json(&body).map_err(|source| ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}
