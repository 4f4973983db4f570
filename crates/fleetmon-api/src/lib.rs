//! Async HTTP client for the fleet-tracking backend.
//!
//! The backend exposes a small, unauthenticated REST surface: device
//! reports, balise inventory, aggregate stats, the customer list, one
//! assignment mutation, and the CMA-CGM manual sync trigger. This crate
//! owns the transport mechanics ([`FleetClient`]) and the wire models
//! ([`models`]) exactly as the backend emits them — consumers get typed
//! results with the HTTP plumbing already dealt with.
//!
//! Responses carry no envelope; a non-2xx status is the only rejection
//! signal, mapped to [`ApiError::Status`].

pub mod client;
pub mod error;
pub mod models;

pub use client::FleetClient;
pub use error::ApiError;
pub use models::{
    AssignmentBody, Balise, BaliseStatus, Report, ShipmentRecord, StatsSummary,
};
