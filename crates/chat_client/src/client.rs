//! HTTP client: fetch `config.json`, post questions to `chat/invoke`.

use crate::messages::{InvokeRequest, InvokeResponse, UiConfig};

pub const CONFIG_PATH: &str = "config.json";
pub const INVOKE_PATH: &str = "chat/invoke";

/// Client request error.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// HTTP client bound to one server base URL (e.g. `http://localhost:8000`).
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `GET /config.json`. Any non-2xx status or bad body is an error.
    pub async fn fetch_config(&self) -> Result<UiConfig, ClientError> {
        let url = self.url(CONFIG_PATH);
        let resp = self.http.get(&url).send().await.map_err(|source| {
            ClientError::Transport {
                url: url.clone(),
                source,
            }
        })?;
        decode(url, resp).await
    }

    /// `POST /chat/invoke` with an empty chat history; returns `output.answer`.
    pub async fn invoke(&self, question: &str) -> Result<String, ClientError> {
        let url = self.url(INVOKE_PATH);
        tracing::debug!(%url, "invoking chat endpoint");
        let resp = self
            .http
            .post(&url)
            .json(&InvokeRequest::new(question))
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        let body: InvokeResponse = decode(url, resp).await?;
        Ok(body.output.answer)
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    url: String,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status { url, status });
    }
    let bytes = resp.bytes().await.map_err(|source| ClientError::Transport {
        url: url.clone(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode { url, source })
}
