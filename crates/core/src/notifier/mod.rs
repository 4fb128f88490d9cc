//! Outbound notification by email.

mod message;
mod smtp;
mod types;

pub use message::build_message;
pub use smtp::SmtpNotifier;
pub use types::*;
