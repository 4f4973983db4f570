//! Domain layer between `fleetmon-api` and the UI binaries (CLI / TUI).
//!
//! This crate owns everything both clients share:
//!
//! - **[`Fleet`]** — facade over the HTTP client. [`Fleet::load_snapshot`]
//!   issues the three dashboard reads (stats, balises, customers)
//!   concurrently and swallows individual failures into empty defaults,
//!   so a half-broken backend still yields a renderable view. Strict
//!   per-endpoint methods exist alongside for callers (the CLI) that
//!   want the error.
//!
//! - **The assignment workflow** ([`assignment`]) — draft state,
//!   synchronous validation, and the tagged [`AssignmentRequest`] whose
//!   CMA-CGM variant is the only one that can carry shipment metadata.
//!   The UIs own keystrokes and buttons; the rules live here.
//!
//! - **[`FleetConfig`]** / **[`CoreError`]** — shared configuration and
//!   error types.
//!
//! Wire models are re-exported from `fleetmon-api` at the crate root for
//! ergonomics.

pub mod assignment;
pub mod config;
pub mod error;
pub mod fleet;

// ── Primary re-exports ──────────────────────────────────────────────
pub use assignment::{
    AssignmentDraft, AssignmentRequest, CustomerAssignment, CustomerCode, DraftError,
    ShipmentDetails, TransportMode, TransportPhase, unassigned_balises,
};
pub use config::FleetConfig;
pub use error::CoreError;
pub use fleet::{Fleet, Snapshot};

// Re-export wire models so consumers rarely need fleetmon-api directly.
pub use fleetmon_api::{ApiError, AssignmentBody, Balise, BaliseStatus, Report, StatsSummary};
