//! Types shared by every herald crate: the outbound message, the
//! gateway-issued identifier, and the single submission error.

pub mod error;
pub mod types;

pub use {
    error::SubmissionError,
    types::{MessageId, OutboundMessage},
};
