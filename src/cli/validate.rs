use std::path::PathBuf;

use console::style;

use crate::cli::commands::ValidateArgs;
use crate::config::parse_config;
use crate::errors::CoastError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), CoastError> {
    let path = PathBuf::from(&args.config);
    let config = parse_config(&path).await?;
    let map = config.map();
    println!("{} Configuration is valid: {}", style("✓").green(), args.config);
    println!(
        "  map: [{}, {}] zoom {}, heat {}",
        map.center[0],
        map.center[1],
        map.zoom,
        if config.heat().enabled { "on" } else { "off" }
    );
    Ok(())
}
