pub mod commands;
pub mod serve;
pub mod summary;
pub mod validate;

pub use commands::{Cli, Commands};
