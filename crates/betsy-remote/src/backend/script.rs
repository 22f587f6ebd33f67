//! HTTP backend for the spreadsheet script endpoint.

use betsy_core::{decode_list_response, Sale, SaleSubmission, SubmitReceipt};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use super::{clean_order_fields, require, SalesBackend};
use crate::config::RemoteConfig;
use crate::{RemoteError, Result};

/// Answer to POST requests.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScriptReply {
    result: Option<String>,
    order_id: Option<String>,
    error: Option<String>,
    message: Option<String>,
}

impl ScriptReply {
    fn error_message(&self) -> Option<String> {
        self.error.clone().or_else(|| {
            if self.result.as_deref() == Some("error") {
                Some(self.message.clone().unwrap_or_else(|| "unknown error".to_string()))
            } else {
                None
            }
        })
    }
}

/// Backend talking to the deployed spreadsheet script over HTTP.
pub struct ScriptBackend {
    client: Client,
    config: RemoteConfig,
}

impl ScriptBackend {
    /// Create a backend for the given endpoint.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        if config.script_url.trim().is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Reject HTML pages and non-success statuses, return the body text.
    async fn read_body(response: Response) -> Result<String> {
        let status = response.status();
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("text/html"));

        let body = response.text().await?;
        if is_html {
            warn!("Endpoint answered with an HTML page ({} bytes)", body.len());
            return Err(RemoteError::Busy);
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }

    async fn post(&self, payload: &Value) -> Result<ScriptReply> {
        let response = self
            .client
            .post(&self.config.script_url)
            .json(payload)
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        let reply: ScriptReply = serde_json::from_str(&body)?;

        if let Some(message) = reply.error_message() {
            return Err(RemoteError::Rejected(message));
        }
        Ok(reply)
    }
}

/// Payload of a status change.
pub(crate) fn status_payload(order_id: &str, status: &str) -> Result<Value> {
    let order_id = require(order_id, "orderId")?;
    let status = require(status, "status")?;
    Ok(json!({
        "action": "updateStatus",
        "orderId": order_id,
        "status": status,
    }))
}

/// Payload of an order edit. The order id is repeated inside `data`.
pub(crate) fn order_update_payload(order_id: &str, fields: Map<String, Value>) -> Result<Value> {
    let order_id = require(order_id, "orderId")?;
    let mut data = clean_order_fields(fields);
    data.insert("orderId".to_string(), Value::String(order_id.to_string()));
    Ok(json!({
        "action": "updateOrder",
        "orderId": order_id,
        "data": data,
    }))
}

impl SalesBackend for ScriptBackend {
    async fn fetch_sales(&self) -> Result<Vec<Sale>> {
        let response = self
            .client
            .get(&self.config.script_url)
            .query(&[("type", "list")])
            .send()
            .await?;
        let body = Self::read_body(response).await?;
        debug!("List body: {} bytes", body.len());

        let sales = decode_list_response(&body)?;
        info!("Fetched {} sales", sales.len());
        Ok(sales)
    }

    async fn submit_sale(&self, submission: &SaleSubmission) -> Result<SubmitReceipt> {
        let payload = serde_json::to_value(submission)?;
        let reply = self.post(&payload).await?;

        match (reply.result.as_deref(), reply.order_id) {
            (Some("success"), Some(order_id)) => {
                info!("Sale registered as {}", order_id);
                Ok(SubmitReceipt { order_id })
            }
            (result, _) => Err(RemoteError::Rejected(format!(
                "unexpected submission result: {}",
                result.unwrap_or("none")
            ))),
        }
    }

    async fn update_status(&self, order_id: &str, status: &str) -> Result<()> {
        let payload = status_payload(order_id, status)?;
        self.post(&payload).await?;
        info!("Order {} set to {}", order_id.trim(), status.trim());
        Ok(())
    }

    async fn update_order(&self, order_id: &str, fields: Map<String, Value>) -> Result<()> {
        let payload = order_update_payload(order_id, fields)?;
        self.post(&payload).await?;
        info!("Order {} updated", order_id.trim());
        Ok(())
    }
}
