//! The [`Fleet`] facade — one handle over the backend for both clients.
//!
//! Reads come in two flavors. The strict per-endpoint methods propagate
//! errors and suit the CLI, where a failed fetch should exit non-zero.
//! [`Fleet::load_snapshot`] / [`Fleet::load_reports`] implement the
//! dashboard loader contract instead: all requests issued concurrently,
//! each failure logged and swallowed into an empty default, so the view
//! always gets something renderable and the loading flag always clears.

use std::sync::Arc;

use tracing::warn;

use fleetmon_api::{Balise, FleetClient, Report, StatsSummary};

use crate::assignment::AssignmentRequest;
use crate::config::FleetConfig;
use crate::error::CoreError;

/// One parallel load of the dashboard data set. Read-only until the next
/// reload replaces it wholesale — there is no incremental mutation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub stats: StatsSummary,
    pub balises: Vec<Balise>,
    pub customers: Vec<String>,
}

/// Facade over the backend API. Cheaply cloneable.
#[derive(Clone)]
pub struct Fleet {
    client: Arc<FleetClient>,
}

impl Fleet {
    /// Build a fleet handle from resolved configuration.
    pub fn new(config: &FleetConfig) -> Result<Self, CoreError> {
        let client = FleetClient::new(config.base_url.clone(), config.timeout)
            .map_err(CoreError::Api)?;
        Ok(Self {
            client: Arc::new(client),
        })
    }

    /// Wrap an existing client (used by tests with a mock server).
    pub fn from_client(client: FleetClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Direct access to the underlying client.
    pub fn client(&self) -> &FleetClient {
        &self.client
    }

    // ── Strict reads (CLI) ───────────────────────────────────────────

    pub async fn reports(&self) -> Result<Vec<Report>, CoreError> {
        Ok(self.client.reports().await?)
    }

    pub async fn balises(&self) -> Result<Vec<Balise>, CoreError> {
        Ok(self.client.balises().await?)
    }

    pub async fn stats(&self) -> Result<StatsSummary, CoreError> {
        Ok(self.client.stats().await?)
    }

    pub async fn customers(&self) -> Result<Vec<String>, CoreError> {
        Ok(self.client.customers().await?)
    }

    // ── Loader reads (TUI) ───────────────────────────────────────────

    /// Load stats, balises, and customers concurrently, waiting for all
    /// three. A failed slice is logged and replaced with its empty
    /// default; the caller clears its loading flag unconditionally.
    pub async fn load_snapshot(&self) -> Snapshot {
        let (stats, balises, customers) = tokio::join!(
            self.client.stats(),
            self.client.balises(),
            self.client.customers(),
        );

        Snapshot {
            stats: stats.unwrap_or_else(|e| {
                warn!(error = %e, "stats load failed, showing zeros");
                StatsSummary::default()
            }),
            balises: balises.unwrap_or_else(|e| {
                warn!(error = %e, "balise load failed, showing empty list");
                Vec::new()
            }),
            customers: customers.unwrap_or_else(|e| {
                warn!(error = %e, "customer load failed, showing empty list");
                Vec::new()
            }),
        }
    }

    /// Load the report table with the same swallow-and-log policy.
    pub async fn load_reports(&self) -> Vec<Report> {
        self.client.reports().await.unwrap_or_else(|e| {
            warn!(error = %e, "report load failed, showing empty table");
            Vec::new()
        })
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Submit one validated assignment. Exactly one POST; the caller
    /// decides what reload follows.
    pub async fn assign(&self, request: &AssignmentRequest) -> Result<(), CoreError> {
        let body = request.to_body();
        self.client.assign(&body).await?;
        Ok(())
    }

    /// Fire the manual CMA-CGM sync trigger. Stateless by design — no
    /// reload is attached to this call.
    pub async fn trigger_sync(&self) -> Result<(), CoreError> {
        Ok(self.client.trigger_sync().await?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn setup() -> (MockServer, Fleet) {
        let server = MockServer::start().await;
        let base_url = Url::parse(&server.uri()).unwrap();
        let fleet = Fleet::from_client(FleetClient::with_client(reqwest::Client::new(), base_url));
        (server, fleet)
    }

    #[tokio::test]
    async fn snapshot_survives_partial_backend_failure() {
        let (server, fleet) = setup().await;

        // Stats endpoint is down; the other two work.
        Mock::given(method("GET"))
            .and(path("/api/balises/stats"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/balises"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "B-01", "imei": "860", "status": "ACTIVE"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/customers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["DHL"])))
            .mount(&server)
            .await;

        let snapshot = fleet.load_snapshot().await;

        assert_eq!(snapshot.stats, StatsSummary::default());
        assert_eq!(snapshot.balises.len(), 1);
        assert_eq!(snapshot.customers, vec!["DHL"]);
    }

    #[tokio::test]
    async fn snapshot_is_all_empty_when_everything_fails() {
        let (server, fleet) = setup().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let snapshot = fleet.load_snapshot().await;

        assert_eq!(snapshot.stats.total, 0);
        assert!(snapshot.balises.is_empty());
        assert!(snapshot.customers.is_empty());
    }

    #[tokio::test]
    async fn report_load_failure_yields_empty_table() {
        let (server, fleet) = setup().await;

        Mock::given(method("GET"))
            .and(path("/api/reports"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let reports = fleet.load_reports().await;
        assert!(reports.is_empty());
    }
}
