use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, timeout, or a non-2xx status.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("not connected to a server; use /connect <port>")]
    NotConnected,
}

impl ClientError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }
}
