//! Dashboard stats summary.

use owo_colors::OwoColorize;

use fleetmon_core::StatsSummary;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{self, should_color};

use super::util;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let fleet = crate::config::build_fleet(global)?;

    let pb = util::spinner(global.quiet, "fetching stats");
    let result = fleet.stats().await;
    util::finish_spinner(pb);

    let stats = result?;
    let color = should_color(&global.color);

    let out = output::render_single(
        &global.output,
        &stats,
        |s| detail(s, color),
        |s| s.total.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(stats: &StatsSummary, color: bool) -> String {
    let line = |label: &str, value: u64| {
        if color {
            format!("{label:<12} {}", value.bold())
        } else {
            format!("{label:<12} {value}")
        }
    };
    [
        line("Total", stats.total),
        line("Active", stats.active),
        line("CMA-CGM", stats.cmacgm),
        line("Unassigned", stats.unassigned),
    ]
    .join("\n")
}
