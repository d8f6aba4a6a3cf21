pub mod validator;
pub mod attachments;

pub use validator::{parse_event_timestamp, parse_report_time, validate_submission};
