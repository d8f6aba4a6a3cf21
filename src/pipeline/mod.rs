pub mod animation;
pub mod coordinator;
pub mod density;
pub mod filter;
pub mod projector;
pub mod state;
pub mod stats;

pub use coordinator::RenderCoordinator;
pub use filter::{InMemoryQuery, ReportQuery};
pub use state::{RenderOutcome, RenderPhase, RenderSnapshot};
