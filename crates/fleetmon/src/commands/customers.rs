//! Customer list.

use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CustomerRow {
    #[tabled(rename = "Customer")]
    name: String,
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let fleet = crate::config::build_fleet(global)?;

    let pb = util::spinner(global.quiet, "fetching customers");
    let result = fleet.customers().await;
    util::finish_spinner(pb);

    let customers = result?;
    let out = output::render_list(
        &global.output,
        &customers,
        |name| CustomerRow { name: name.clone() },
        Clone::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
