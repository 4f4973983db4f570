//! Balise inventory listing.

use tabled::Tabled;

use fleetmon_core::{Balise, BaliseStatus, unassigned_balises};

use crate::cli::{BalisesArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BaliseRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IMEI")]
    imei: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Battery")]
    battery: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

impl From<&Balise> for BaliseRow {
    fn from(b: &Balise) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
            imei: b.imei.clone(),
            status: status_cell(b.status),
            customer: b
                .customer
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "Unassigned".into()),
            battery: b
                .battery_level
                .map_or_else(|| "Unknown".into(), |pct| format!("{pct}%")),
            last_seen: b.last_seen.map_or_else(
                || "Never".into(),
                |ts| ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
        }
    }
}

fn status_cell(status: BaliseStatus) -> String {
    match status {
        BaliseStatus::Active => "ACTIVE".into(),
        BaliseStatus::Inactive => "INACTIVE".into(),
        _ => "UNKNOWN".into(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: &BalisesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let fleet = crate::config::build_fleet(global)?;

    let pb = util::spinner(global.quiet, "fetching balises");
    let result = fleet.balises().await;
    util::finish_spinner(pb);

    let balises = result?;
    let filtered: Vec<Balise> = if args.unassigned {
        unassigned_balises(&balises).into_iter().cloned().collect()
    } else {
        balises
    };

    let out = output::render_list(
        &global.output,
        &filtered,
        |b| BaliseRow::from(b),
        |b| b.id.to_string(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
