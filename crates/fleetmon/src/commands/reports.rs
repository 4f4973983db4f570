//! Report table — the read-only dashboard surface.

use tabled::Tabled;

use fleetmon_core::Report;

use crate::cli::{GlobalOpts, ReportsArgs};
use crate::error::CliError;
use crate::output::{self, opt_cell, truncate_cell};

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Lock Code")]
    lock_code: String,
    #[tabled(rename = "Command Type")]
    command_type: String,
    #[tabled(rename = "Received At")]
    received_at: String,
    #[tabled(rename = "Raw Data")]
    raw_data: String,
}

impl From<&Report> for ReportRow {
    fn from(r: &Report) -> Self {
        Self {
            id: r.id,
            lock_code: opt_cell(r.lock_code.as_deref()),
            command_type: opt_cell(r.command_type.as_deref()),
            received_at: opt_cell(r.received_at.as_deref()),
            raw_data: truncate_cell(&r.report_data, 48),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &ReportsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let fleet = crate::config::build_fleet(global)?;

    let pb = util::spinner(global.quiet, "fetching reports");
    let result = fleet.reports().await;
    util::finish_spinner(pb);

    let mut reports = result?;
    if let Some(limit) = args.limit {
        reports.truncate(limit);
    }

    let out = output::render_list(
        &global.output,
        &reports,
        |r| ReportRow::from(r),
        |r| r.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
