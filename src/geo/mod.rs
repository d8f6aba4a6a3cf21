pub mod provider;
pub mod requester;

pub use provider::{Coordinates, DeniedGeolocation, GeolocationProvider, StaticGeolocation};
pub use requester::{LocationOutcome, LocationRequester};
