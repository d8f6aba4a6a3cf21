pub mod types;
pub mod classification;

pub use types::CoastError;
pub use classification::{ErrorCategory, ErrorClassification};
