use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coastsense", version, about = "Coastal hazard report map and statistics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Print report statistics for a filter
    Summary(SummaryArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Listen address (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct SummaryArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Hazard type, e.g. "High Waves"
    #[arg(long)]
    pub hazard_type: Option<String>,

    /// Severity: low, medium, high
    #[arg(long)]
    pub severity: Option<String>,

    /// Case-insensitive location substring
    #[arg(long)]
    pub location: Option<String>,

    /// Relative window: 24h, 7d, 30d
    #[arg(long)]
    pub since: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Configuration file to check
    pub config: String,
}
