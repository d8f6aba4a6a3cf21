use clap::Parser;
use tracing_subscriber::EnvFilter;

use coastsense::cli::{self, Commands};
use coastsense::errors::{CoastError, ErrorCategory};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, 0) => "warn",
        (_, 0) => "info",
        (_, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(!cli.no_color).init();
    }

    if cli.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let result = match cli.command {
        Commands::Serve(args) => cli::serve::handle_serve(args).await,
        Commands::Summary(args) => cli::summary::handle_summary(args, cli.quiet).await,
        Commands::Validate(args) => cli::validate::handle_validate(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(err: &CoastError) -> i32 {
    match err {
        CoastError::Config(_) | CoastError::Yaml(_) => 2,
        CoastError::Io(_) => 3,
        CoastError::CapabilityUnavailable(_) => 4,
        _ if err.classify().category == ErrorCategory::InputValidation => 5,
        _ => 1,
    }
}
