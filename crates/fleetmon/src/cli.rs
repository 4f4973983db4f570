//! Clap derive structures for the `fleetmon` CLI.
//!
//! Defines the complete command tree, global flags, and shared enums.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use fleetmon_core::{CustomerCode, TransportMode, TransportPhase};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fleetmon -- manage fleet-tracking balises from the command line
#[derive(Debug, Parser)]
#[command(
    name = "fleetmon",
    version,
    about = "Inspect and manage fleet-tracking balises from the command line",
    long_about = "Client for the fleet-tracking backend: device reports, balise\n\
        inventory, dashboard stats, customer assignment, and the CMA-CGM\n\
        manual sync trigger.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend server URL (e.g. http://tracker.example.net:6062)
    #[arg(long, short = 'c', env = "FLEET_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLEET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FLEET_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List stored device reports
    #[command(alias = "rep")]
    Reports(ReportsArgs),

    /// List tracked balises and their assignments
    #[command(alias = "bal", alias = "b")]
    Balises(BalisesArgs),

    /// Show aggregate dashboard stats
    Stats,

    /// List known customers
    Customers,

    /// Assign a balise to a customer
    #[command(alias = "as")]
    Assign(AssignArgs),

    /// Trigger a manual CMA-CGM sync
    Sync,

    /// Inspect or edit the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-Command Args ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportsArgs {
    /// Show at most this many reports (newest last, as the backend returns them)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct BalisesArgs {
    /// Only balises without a customer (the assignable set)
    #[arg(long)]
    pub unassigned: bool,
}

#[derive(Debug, Args)]
pub struct AssignArgs {
    /// Balise id to assign
    #[arg(long, short = 'b')]
    pub balise: i64,

    /// Customer code: CMACGM, DHL, MAERSK, or OTHER
    #[arg(long, short = 'C', value_parser = parse_customer)]
    pub customer: CustomerCode,

    /// Free-text assignment notes
    #[arg(long, default_value = "")]
    pub notes: String,

    // CMA-CGM container metadata (required for --customer CMACGM)
    /// Equipment reference, e.g. APZU2106333
    #[arg(long)]
    pub equipment_ref: Option<String>,

    /// Carrier booking reference, e.g. LHV3076333
    #[arg(long)]
    pub booking_ref: Option<String>,

    /// Transport order, e.g. TLHV2330333
    #[arg(long)]
    pub transport_order: Option<String>,

    /// Mode of transport: truck, rail, barge, or vessel
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<TransportMode>,

    /// Partner company name
    #[arg(long)]
    pub partner: Option<String>,

    /// Transportation phase: import or export
    #[arg(long, value_parser = parse_phase)]
    pub phase: Option<TransportPhase>,

    /// Location identifier
    #[arg(long)]
    pub location_code: Option<String>,

    /// Location display name
    #[arg(long)]
    pub location_name: Option<String>,

    /// Facility street address
    #[arg(long)]
    pub facility_address: Option<String>,

    /// Facility city
    #[arg(long)]
    pub facility_city: Option<String>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write a starter config file
    Init {
        /// Backend server URL to record
        #[arg(long)]
        server: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: Shell,
}

// ── Value parsers ────────────────────────────────────────────────────

fn parse_customer(s: &str) -> Result<CustomerCode, String> {
    s.parse()
        .map_err(|_| format!("unknown customer '{s}' (expected CMACGM, DHL, MAERSK, or OTHER)"))
}

fn parse_mode(s: &str) -> Result<TransportMode, String> {
    s.parse()
        .map_err(|_| format!("unknown transport mode '{s}' (expected truck, rail, barge, or vessel)"))
}

fn parse_phase(s: &str) -> Result<TransportPhase, String> {
    s.parse()
        .map_err(|_| format!("unknown phase '{s}' (expected import or export)"))
}
