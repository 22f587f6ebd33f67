//! Sales backend implementations.

pub mod memory;

#[cfg(feature = "http")]
pub mod script;

use std::future::Future;

use betsy_core::{Sale, SaleSubmission, SubmitReceipt};
use serde_json::{Map, Value};

use crate::{RemoteError, Result};

/// Trait for stores that hold the order list.
///
/// The futures are `Send` so a backend can be driven from a spawned task.
pub trait SalesBackend: Send + Sync {
    /// Fetch the current order list.
    fn fetch_sales(&self) -> impl Future<Output = Result<Vec<Sale>>> + Send;

    /// Register a new sale and return the assigned order id.
    fn submit_sale(
        &self,
        submission: &SaleSubmission,
    ) -> impl Future<Output = Result<SubmitReceipt>> + Send;

    /// Set the workflow status of an order.
    fn update_status(
        &self,
        order_id: &str,
        status: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Overwrite fields of an order. Keys use the list's JSON names.
    fn update_order(
        &self,
        order_id: &str,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Require a non-blank value.
pub(crate) fn require<'a>(value: &'a str, name: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RemoteError::InvalidRequest(format!(
            "missing required field: {}",
            name
        )));
    }
    Ok(value)
}

/// Trim string values of an order update.
pub fn clean_order_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, Value::String(s.trim().to_string())),
            other => (key, other),
        })
        .collect()
}
