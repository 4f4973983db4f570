//! Manual CMA-CGM sync trigger — stateless by contract.

use owo_colors::OwoColorize;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::should_color;

use super::util;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    if !util::confirm("Trigger a manual CMA-CGM sync?", global.yes)? {
        return Ok(());
    }

    let fleet = crate::config::build_fleet(global)?;

    let pb = util::spinner(global.quiet, "triggering sync");
    let result = fleet.trigger_sync().await;
    util::finish_spinner(pb);
    result?;

    // One-shot acknowledgment; the sync's outcome shows up on the next
    // regular reload, not here.
    if !global.quiet {
        if should_color(&global.color) {
            eprintln!("{} manual sync triggered", "✓".green());
        } else {
            eprintln!("manual sync triggered");
        }
    }
    Ok(())
}
