use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::Position;
use crate::surface::Viewport;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CoastConfig {
    pub map: Option<MapConfig>,
    pub heat: Option<HeatConfig>,
    pub stats: Option<StatsConfig>,
    pub notifications: Option<NotificationConfig>,
    pub geolocation: Option<GeolocationConfig>,
    pub server: Option<ServerConfig>,
    pub seed: Option<SeedConfig>,
}

impl CoastConfig {
    pub fn map(&self) -> MapConfig {
        self.map.clone().unwrap_or_default()
    }

    pub fn heat(&self) -> HeatConfig {
        self.heat.clone().unwrap_or_default()
    }

    pub fn stats(&self) -> StatsConfig {
        self.stats.clone().unwrap_or_default()
    }

    pub fn notifications(&self) -> NotificationConfig {
        self.notifications.clone().unwrap_or_default()
    }

    pub fn geolocation(&self) -> GeolocationConfig {
        self.geolocation.clone().unwrap_or_default()
    }

    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    pub fn seed(&self) -> SeedConfig {
        self.seed.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    /// Delay before the one-off size invalidation after mount.
    pub invalidate_delay_ms: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [20.5937, 78.9629],
            zoom: 5,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: "© OpenStreetMap contributors".into(),
            invalidate_delay_ms: 200,
        }
    }
}

impl MapConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport {
            center: Position { lat: self.center[0], lng: self.center[1] },
            zoom: self.zoom,
            tile_url: self.tile_url.clone(),
            attribution: self.attribution.clone(),
        }
    }

    pub fn invalidate_delay(&self) -> Duration {
        Duration::from_millis(self.invalidate_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeatConfig {
    pub enabled: bool,
    pub radius: u32,
    pub blur: u32,
    pub max_zoom: u32,
}

impl Default for HeatConfig {
    fn default() -> Self {
        Self { enabled: true, radius: 30, blur: 20, max_zoom: 17 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StatsConfig {
    pub animation_ms: u64,
    pub frame_ms: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self { animation_ms: 1000, frame_ms: 16 }
    }
}

impl StatsConfig {
    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub visible_ms: u64,
    pub exit_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { visible_ms: 3000, exit_ms: 300 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeolocationConfig {
    pub timeout_ms: u64,
    /// Fixed `[lat, lng]` reported by the server-side provider. Without it the
    /// server has no geolocation capability.
    pub fixed_position: Option<[f64; 2]>,
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self { timeout_ms: 10_000, fixed_position: None }
    }
}

impl GeolocationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedConfig {
    pub include_samples: bool,
    pub path: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { include_samples: true, path: None }
    }
}
