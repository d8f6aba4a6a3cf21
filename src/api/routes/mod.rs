pub mod attachments;
pub mod health;
pub mod location;
pub mod notifications;
pub mod reports;
pub mod view;
