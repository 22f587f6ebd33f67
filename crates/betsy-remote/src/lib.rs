//! Remote layer for Betsy CRM.
//!
//! Orders live in a spreadsheet behind a script endpoint. This crate
//! provides:
//! - a [`SalesBackend`] trait covering list, submit and update operations
//! - [`ScriptBackend`], the HTTP implementation (`http` feature)
//! - [`InMemoryBackend`] for tests and offline runs
//! - [`SalesPoller`], which re-fetches the list on an interval

mod backend;
mod config;
mod error;
mod poller;

pub use backend::memory::InMemoryBackend;
pub use backend::{clean_order_fields, SalesBackend};
pub use config::RemoteConfig;
pub use error::RemoteError;
pub use poller::{PollEvent, SalesPoller};

#[cfg(feature = "http")]
pub use backend::script::ScriptBackend;

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
