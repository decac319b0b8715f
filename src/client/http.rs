//! VideoClient - typed async calls against the video resource.

use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ClientError;
use crate::store::{RemoveOutcome, UpdateOutcome};
use crate::video::{Video, VideoInput};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for `/api/videos`. Cheap to clone; clones share a connection pool.
#[derive(Clone)]
pub struct VideoClient {
    http: reqwest::Client,
    base: String,
}

impl VideoClient {
    /// Client for the server at `base_url` (e.g. `"http://127.0.0.1:3000"`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/api/videos", self.base)
    }

    fn video_url(&self, id: &str) -> String {
        format!("{}/api/videos/{}", self.base, id)
    }

    /// `GET /api/videos`
    pub async fn list(&self) -> Result<Vec<Video>, ClientError> {
        let resp = self.http.get(self.collection_url()).send().await?;
        decode(resp).await
    }

    /// `POST /api/videos`
    pub async fn create(&self, input: &VideoInput) -> Result<Video, ClientError> {
        let resp = self
            .http
            .post(self.collection_url())
            .json(input)
            .send()
            .await?;
        decode(resp).await
    }

    /// `GET /api/videos/:id`
    pub async fn get(&self, id: &str) -> Result<Video, ClientError> {
        let resp = self.http.get(self.video_url(id)).send().await?;
        decode(resp).await
    }

    /// `PUT /api/videos/:id`
    pub async fn update(&self, id: &str, input: &VideoInput) -> Result<UpdateOutcome, ClientError> {
        let resp = self.http.put(self.video_url(id)).json(input).send().await?;
        decode(resp).await
    }

    /// `DELETE /api/videos/:id`
    pub async fn delete(&self, id: &str) -> Result<RemoveOutcome, ClientError> {
        let resp = self.http.delete(self.video_url(id)).send().await?;
        decode(resp).await
    }
}

/// Decode a success body, or turn an error status into a `ClientError`.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);

    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(message))
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}
