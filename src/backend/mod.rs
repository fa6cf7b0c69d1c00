//! Client for the external booking backend. Every persistent operation of the
//! portal goes through here.

mod client;
mod error;

pub use client::{BackendClient, BackendResult, Download};
pub use error::{extract_message, BackendError};
