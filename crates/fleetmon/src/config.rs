//! CLI-side configuration resolution.
//!
//! Thin wrapper over `fleetmon_config` that layers `GlobalOpts` flag
//! overrides on top of the shared file/env chain.

use fleetmon_core::Fleet;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use fleetmon_config::{Config, config_path, load_config_or_default, save_config};

/// Build a connected-ready [`Fleet`] from config + CLI overrides.
///
/// Flag (`--server`) beats env (`FLEET_SERVER`, already folded into the
/// flag by clap) beats the config file.
pub fn build_fleet(global: &GlobalOpts) -> Result<Fleet, CliError> {
    let cfg = load_config_or_default();
    let fleet_config = fleetmon_config::resolve(&cfg, global.server.as_deref(), global.timeout)?;
    Ok(Fleet::new(&fleet_config)?)
}
