//! core/api.rs
//! Catalogue HTTP client.
//!
//! Two calls:
//! - fetch a content record (optionally bypassing caches)
//! - ask the server for a freshly signed link for one quality
//!
//! No Iced imports. No request timeout: the network stack default applies.

use reqwest::{Client, Response, StatusCode, Url, header};
use serde::Deserialize;

use super::error::{ApiError, ApiResult};
use super::types::{ContentRecord, RefreshedLink};

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Error body shape used by the server (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::info!(%base_url, "catalogue client ready");

        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// `{base}/api/{segments...}`. Each segment is percent-encoded on its own,
    /// so an id can never add path levels, a query or a fragment.
    pub fn build_url(&self, segments: &[&str]) -> ApiResult<Url> {
        if let Some(bad) = segments.iter().find(|s| s.is_empty() || matches!(**s, "." | "..")) {
            return Err(ApiError::InvalidRequest(format!("bad path segment {bad:?}")));
        }

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);

        Ok(url)
    }

    /// `None` when the server has no such record (404 or JSON `null`).
    pub async fn get_content_by_id(
        &self,
        id: &str,
        force_refresh: bool,
    ) -> ApiResult<Option<ContentRecord>> {
        let url = self.build_url(&["movies", id])?;
        tracing::debug!(%url, force_refresh, "fetching content");

        let mut req = self.client.get(url);
        if force_refresh {
            req = req
                .query(&[("refresh", "true")])
                .header(header::CACHE_CONTROL, "no-cache");
        }

        let response = req.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = check_status(response, None).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str::<Option<ContentRecord>>(&body)?)
    }

    /// Same as `get_content_by_id`, but a missing record is an error.
    pub async fn fetch_content(&self, id: &str, force_refresh: bool) -> ApiResult<ContentRecord> {
        self.get_content_by_id(id, force_refresh)
            .await?
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }

    pub async fn refresh_link(&self, id: &str, quality: &str) -> ApiResult<RefreshedLink> {
        let url = self.build_url(&["refresh-link", id])?;
        tracing::info!(%url, quality, "requesting refreshed link");

        let response = self
            .client
            .post(url)
            .query(&[("quality", quality)])
            .send()
            .await?;

        let response = check_status(response, Some(quality)).await?;
        Ok(response.json::<RefreshedLink>().await?)
    }

    /// Raw bytes (artwork). Errors are flattened to strings for the GUI.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, String> {
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;
        let response = response.error_for_status().map_err(|e| e.to_string())?;
        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(bytes.to_vec())
    }
}

async fn check_status(response: Response, quality: Option<&str>) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, quality))
}

/// Map a non-2xx status (+ body) to an `ApiError`.
fn status_error(status: StatusCode, body: &str, quality: Option<&str>) -> ApiError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty());

    match (status, quality) {
        (StatusCode::BAD_REQUEST, Some(q)) => ApiError::QualityUnavailable(q.to_string()),
        (StatusCode::NOT_FOUND, _) => {
            ApiError::NotFound(detail.unwrap_or_else(|| "not found".to_string()))
        }
        _ => ApiError::Server {
            status: status.as_u16(),
            detail,
        },
    }
}
