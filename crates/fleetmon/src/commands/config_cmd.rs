//! `fleetmon config` — inspect or bootstrap the shared config file.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: &ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match &args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_default(),
                |c| c.server.url.clone().unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { server } => {
            let mut cfg = Config::default();
            cfg.server.url = server
                .clone()
                .or_else(|| global.server.clone())
                .or_else(|| Some("http://tracker.example.net:6062".into()));
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("wrote {}", config::config_path().display());
            }
            Ok(())
        }
    }
}
