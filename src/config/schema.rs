use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "map": {
                "type": "object",
                "properties": {
                    "center": {
                        "type": "array",
                        "items": { "type": "number" },
                        "minItems": 2,
                        "maxItems": 2
                    },
                    "zoom": { "type": "integer", "minimum": 0, "maximum": 22 },
                    "tile_url": { "type": "string" },
                    "attribution": { "type": "string" },
                    "invalidate_delay_ms": { "type": "integer", "minimum": 0 }
                }
            },
            "heat": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "radius": { "type": "integer", "minimum": 1 },
                    "blur": { "type": "integer", "minimum": 0 },
                    "max_zoom": { "type": "integer", "minimum": 0, "maximum": 22 }
                }
            },
            "stats": {
                "type": "object",
                "properties": {
                    "animation_ms": { "type": "integer", "minimum": 0 },
                    "frame_ms": { "type": "integer", "minimum": 1 }
                }
            },
            "notifications": {
                "type": "object",
                "properties": {
                    "visible_ms": { "type": "integer", "minimum": 1 },
                    "exit_ms": { "type": "integer", "minimum": 0 }
                }
            },
            "geolocation": {
                "type": "object",
                "properties": {
                    "timeout_ms": { "type": "integer", "minimum": 1 },
                    "fixed_position": {
                        "type": ["array", "null"],
                        "items": { "type": "number" },
                        "minItems": 2,
                        "maxItems": 2
                    }
                }
            },
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 0, "maximum": 65535 }
                }
            },
            "seed": {
                "type": "object",
                "properties": {
                    "include_samples": { "type": "boolean" },
                    "path": { "type": ["string", "null"] }
                }
            }
        }
    })
});
