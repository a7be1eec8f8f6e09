//! Twilio Messages API gateway.
//!
//! Sends WhatsApp (or any channel-prefixed) text messages through
//! `POST /2010-04-01/Accounts/{sid}/Messages.json`.

pub mod account;
pub mod client;

pub use {account::TwilioAccount, client::TwilioClient};
