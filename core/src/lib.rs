//! Core library for the widd chat client: configuration, the webhook
//! transport, and the response-formatting pipeline that turns raw webhook
//! text into renderable blocks.

pub mod config;
pub mod error;
pub mod format;
pub mod webhook;

pub use error::Result;
pub use error::WiddErr;
