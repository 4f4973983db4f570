// Backend HTTP client
//
// Wraps `reqwest::Client` with base-URL path construction and the status
// triage shared by every endpoint. The backend returns bare JSON with no
// envelope, so the helpers only have two jobs: reject non-2xx responses
// and decode the body with a useful error when the shape is off.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::models::{AssignmentBody, Balise, Report, StatsSummary};

/// HTTP client for the fleet backend's REST API.
///
/// Cheap to clone; all methods take `&self`. The base URL is the server
/// root (e.g. `http://tracker.example.net:6062`) — endpoint paths are
/// appended under `/api/`.
#[derive(Debug, Clone)]
pub struct FleetClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FleetClient {
    /// Create a client with its own connection pool and request timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self { http, base_url })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    ///
    /// Used by tests that need a mock server and by callers sharing one
    /// pool across clients.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The configured server root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).map_err(|e| ApiError::InvalidUrl(format!("{full}: {e}")))
    }

    // ── Read endpoints ───────────────────────────────────────────────

    /// `GET /api/reports` — all stored device reports.
    pub async fn reports(&self) -> Result<Vec<Report>, ApiError> {
        self.get(self.api_url("reports")?).await
    }

    /// `GET /api/balises` — the full balise inventory with assignments.
    pub async fn balises(&self) -> Result<Vec<Balise>, ApiError> {
        self.get(self.api_url("balises")?).await
    }

    /// `GET /api/balises/stats` — aggregate dashboard counts.
    pub async fn stats(&self) -> Result<StatsSummary, ApiError> {
        self.get(self.api_url("balises/stats")?).await
    }

    /// `GET /api/customers` — known customer names.
    pub async fn customers(&self) -> Result<Vec<String>, ApiError> {
        self.get(self.api_url("customers")?).await
    }

    // ── Write endpoints ──────────────────────────────────────────────

    /// `POST /api/balises/assign` — assign one balise to a customer.
    ///
    /// The response body carries no contract beyond the status code, so a
    /// 2xx maps to `Ok(())` and everything else to [`ApiError::Status`].
    pub async fn assign(&self, body: &AssignmentBody) -> Result<(), ApiError> {
        let url = self.api_url("balises/assign")?;
        debug!(%url, balise_id = body.balise_id, customer = %body.customer, "POST assign");

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::check_status(resp).await.map(|_| ())
    }

    /// `POST /api/cmacgm/sync` — ask the backend to reconcile with the
    /// partner integration. Empty body, status-only response.
    pub async fn trigger_sync(&self) -> Result<(), ApiError> {
        let url = self.api_url("cmacgm/sync")?;
        debug!(%url, "POST manual sync");

        let resp = self
            .http
            .post(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::check_status(resp).await.map(|_| ())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(ApiError::Transport)?;
        let resp = Self::check_status(resp).await?;

        let body = resp.text().await.map_err(ApiError::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            ApiError::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Reject non-success statuses, keeping a short body preview for the
    /// error message.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status,
            body: body[..body.len().min(200)].to_owned(),
        })
    }
}
