pub mod map;
pub mod stats;

pub use map::{LayerCanvas, LayerId, MapSurface, Viewport};
pub use stats::{StatsBoard, StatsSurface};
