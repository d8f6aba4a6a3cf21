use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::CoastError;
use crate::models::Position;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Async source of the user's current position. May fail, be denied, or
/// never resolve; callers bound it with a timeout.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, CoastError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;
}

/// Always answers with a configured position.
#[derive(Debug, Clone)]
pub struct StaticGeolocation {
    position: Position,
}

impl StaticGeolocation {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationProvider for StaticGeolocation {
    async fn current_position(&self) -> Result<Coordinates, CoastError> {
        Ok(Coordinates {
            latitude: self.position.lat,
            longitude: self.position.lng,
        })
    }

    fn provider_name(&self) -> &str {
        "static"
    }
}

/// Always denies, like a user refusing the permission prompt.
#[derive(Debug, Clone, Default)]
pub struct DeniedGeolocation;

#[async_trait]
impl GeolocationProvider for DeniedGeolocation {
    async fn current_position(&self) -> Result<Coordinates, CoastError> {
        Err(CoastError::Geolocation("permission denied".into()))
    }

    fn provider_name(&self) -> &str {
        "denied"
    }
}
