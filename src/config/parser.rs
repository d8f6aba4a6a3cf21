use std::path::Path;
use crate::errors::CoastError;
use crate::models::Position;
use super::types::CoastConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub async fn parse_config(path: &Path) -> Result<CoastConfig, CoastError> {
    if !path.exists() {
        return Err(CoastError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(CoastError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

/// Parse config text. An empty document yields the defaults.
pub fn parse_config_str(content: &str) -> Result<CoastConfig, CoastError> {
    if content.trim().is_empty() {
        return Ok(CoastConfig::default());
    }
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: CoastConfig = serde_yaml::from_value(yaml)?;

    // Semantic conflict detection
    validate_conflicts(&config)?;

    Ok(config)
}

/// Load the config at `path`, or the defaults when no path is given.
pub async fn load_config(path: Option<&Path>) -> Result<CoastConfig, CoastError> {
    match path {
        Some(p) => parse_config(p).await,
        None => Ok(CoastConfig::default()),
    }
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), CoastError> {
    // Convert YAML value to JSON for schema validation
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| CoastError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| CoastError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        // Advisory only; typed parsing and conflict checks are authoritative.
        for msg in &messages {
            warn!(validation_error = %msg, "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &CoastConfig) -> Result<(), CoastError> {
    let map = config.map();
    Position::new(map.center[0], map.center[1])
        .map_err(|e| CoastError::Config(format!("map.center: {}", e)))?;
    if map.zoom > 22 {
        return Err(CoastError::Config(format!("map.zoom {} exceeds 22", map.zoom)));
    }
    if !map.tile_url.contains("{z}") || !map.tile_url.contains("{x}") || !map.tile_url.contains("{y}") {
        return Err(CoastError::Config(format!(
            "map.tile_url '{}' must contain {{z}}, {{x}} and {{y}} placeholders",
            map.tile_url
        )));
    }

    let heat = config.heat();
    if heat.radius == 0 {
        return Err(CoastError::Config("heat.radius must be positive".into()));
    }

    if config.stats().frame_ms == 0 {
        return Err(CoastError::Config("stats.frame_ms must be positive".into()));
    }

    if config.notifications().visible_ms == 0 {
        return Err(CoastError::Config("notifications.visible_ms must be positive".into()));
    }

    let geo = config.geolocation();
    if geo.timeout_ms == 0 {
        return Err(CoastError::Config("geolocation.timeout_ms must be positive".into()));
    }
    if let Some([lat, lng]) = geo.fixed_position {
        Position::new(lat, lng)
            .map_err(|e| CoastError::Config(format!("geolocation.fixed_position: {}", e)))?;
    }

    // Warn if the map would start empty
    let seed = config.seed();
    if !seed.include_samples && seed.path.is_none() {
        warn!("Seed samples disabled and no seed file configured; map starts empty");
    }

    Ok(())
}
