//! Outbound channel abstraction and the single-message dispatcher.
//!
//! A messaging gateway (Twilio, ...) implements [`ChannelOutbound`]; the
//! [`Dispatcher`] owns one gateway instance and submits one message per
//! call to [`Dispatcher::send`].

pub mod dispatcher;
pub mod plugin;

pub use {dispatcher::Dispatcher, plugin::ChannelOutbound};
