pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod geo;
pub mod intake;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod platform;
pub mod store;
pub mod surface;
pub mod utils;
