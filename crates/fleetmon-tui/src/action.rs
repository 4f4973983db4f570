//! All possible UI actions. Actions are the sole mechanism for state mutation.

use fleetmon_core::{AssignmentRequest, Report, Snapshot};

use crate::screen::ScreenId;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Data loading ──────────────────────────────────────────────
    /// Reload everything. `manual` drives the refreshing indicator
    /// instead of the initial loading spinner.
    Refresh { manual: bool },
    /// One full load finished (all requests awaited, failures already
    /// swallowed to empty defaults). Stale generations are dropped.
    DataLoaded {
        generation: u64,
        snapshot: Snapshot,
        reports: Vec<Report>,
    },

    // ── Assignment workflow ───────────────────────────────────────
    OpenAssign,
    CloseAssign,
    /// A validated request leaving the form — exactly one POST follows.
    SubmitAssignment(AssignmentRequest),
    /// Outcome of the POST; `Err` carries the user-facing message.
    AssignmentResult(Result<(), String>),

    // ── Manual sync ───────────────────────────────────────────────
    TriggerSync,
    SyncResult(Result<(), String>),

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
