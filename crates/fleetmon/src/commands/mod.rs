//! Command handlers, one module per resource.

pub mod assign;
pub mod balises;
pub mod config_cmd;
pub mod customers;
pub mod reports;
pub mod stats;
pub mod sync;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler. Config and completions are
/// handled upstream in `main`; everything here may talk to the backend.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Reports(args) => reports::handle(&args, global).await,
        Command::Balises(args) => balises::handle(&args, global).await,
        Command::Stats => stats::handle(global).await,
        Command::Customers => customers::handle(global).await,
        Command::Assign(args) => assign::handle(args, global).await,
        Command::Sync => sync::handle(global).await,
        Command::Config(_) | Command::Completions(_) => unreachable!("handled in main"),
    }
}
