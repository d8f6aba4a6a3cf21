pub mod severity;
pub mod report;
pub mod filter;
pub mod stats;
pub mod marker;
pub mod submission;

pub use severity::*;
pub use report::*;
pub use filter::*;
pub use stats::*;
pub use marker::*;
pub use submission::*;
