//! In-memory backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use betsy_core::{Sale, SaleSubmission, SubmitReceipt};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::{clean_order_fields, require, SalesBackend};
use crate::{RemoteError, Result};

/// Backend that keeps orders in a local vector. Order ids are `ORD-n`.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    sales: Mutex<Vec<Sale>>,
    next_id: AtomicU64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list.
    pub fn with_sales(sales: Vec<Sale>) -> Self {
        Self {
            sales: Mutex::new(sales),
            next_id: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Sale>> {
        self.sales.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_found(order_id: &str) -> RemoteError {
        RemoteError::Rejected(format!("order not found: {}", order_id))
    }
}

impl SalesBackend for InMemoryBackend {
    async fn fetch_sales(&self) -> Result<Vec<Sale>> {
        Ok(self.lock().clone())
    }

    async fn submit_sale(&self, submission: &SaleSubmission) -> Result<SubmitReceipt> {
        let issues = submission.validate();
        if !issues.is_empty() {
            return Err(RemoteError::Rejected(issues.join("; ")));
        }

        let order_id = format!("ORD-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        self.lock().push(submission.to_sale(order_id.clone()));
        info!("Stored sale {}", order_id);

        Ok(SubmitReceipt { order_id })
    }

    async fn update_status(&self, order_id: &str, status: &str) -> Result<()> {
        let order_id = require(order_id, "orderId")?;
        let status = require(status, "status")?;

        let mut sales = self.lock();
        let sale = sales
            .iter_mut()
            .find(|s| s.order_id == order_id)
            .ok_or_else(|| Self::not_found(order_id))?;
        debug!("{}: {} -> {}", order_id, sale.status, status);
        sale.status = status.to_string();
        Ok(())
    }

    async fn update_order(&self, order_id: &str, fields: Map<String, Value>) -> Result<()> {
        let order_id = require(order_id, "orderId")?;
        let fields = clean_order_fields(fields);

        let mut sales = self.lock();
        let sale = sales
            .iter_mut()
            .find(|s| s.order_id == order_id)
            .ok_or_else(|| Self::not_found(order_id))?;

        let Value::Object(mut current) = serde_json::to_value(&*sale)? else {
            return Err(RemoteError::InvalidRequest("order is not an object".to_string()));
        };
        for (key, value) in fields {
            if key != "orderId" {
                current.insert(key, value);
            }
        }
        *sale = serde_json::from_value(Value::Object(current))
            .map_err(|e| RemoteError::InvalidRequest(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use betsy_core::{CustomerInfo, OrderType, Packaging, ProductInfo, Seller};
    use serde_json::json;

    fn submission() -> SaleSubmission {
        let customer = CustomerInfo {
            name: "Ana Perez".to_string(),
            phone: "88881234".to_string(),
            email: "ana@x.com".to_string(),
            username: "@ana".to_string(),
            business: "Quark".to_string(),
            agreed_date: "2024-05-02".to_string(),
            pickup_date: "2024-05-03".to_string(),
            order_type: OrderType::Pickup,
            ..Default::default()
        };
        let product = ProductInfo {
            product: "Taza".to_string(),
            color: "Negro".to_string(),
            size: "M".to_string(),
            packaging: Packaging::Normal,
            quantity: 1,
            product_cost: 100.0,
            seller: Seller::Web,
            ..Default::default()
        };
        SaleSubmission::with_timestamp(customer, product, false, "2024-05-01T10:00:00.000Z")
    }

    #[tokio::test]
    async fn test_submit_and_fetch() {
        let backend = InMemoryBackend::new();
        let first = backend.submit_sale(&submission()).await.unwrap();
        let second = backend.submit_sale(&submission()).await.unwrap();
        assert_eq!(first.order_id, "ORD-1");
        assert_eq!(second.order_id, "ORD-2");

        let sales = backend.fetch_sales().await.unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].customer_name, "Ana Perez");
        assert_eq!(sales[0].total, 100.0);
    }

    #[tokio::test]
    async fn test_invalid_submission_rejected() {
        let backend = InMemoryBackend::new();
        let mut invalid = submission();
        invalid.customer_info.name.clear();

        let err = backend.submit_sale(&invalid).await.unwrap_err();
        assert!(matches!(err, RemoteError::Rejected(msg) if msg.contains("Missing customer name")));
        assert!(backend.fetch_sales().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_status() {
        let backend = InMemoryBackend::new();
        let receipt = backend.submit_sale(&submission()).await.unwrap();

        backend.update_status(&receipt.order_id, "Impreso").await.unwrap();
        assert_eq!(backend.fetch_sales().await.unwrap()[0].status, "Impreso");

        assert!(matches!(
            backend.update_status("ORD-99", "Impreso").await,
            Err(RemoteError::Rejected(_))
        ));
        assert!(matches!(
            backend.update_status(&receipt.order_id, " ").await,
            Err(RemoteError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_order_fields() {
        let backend = InMemoryBackend::new();
        let receipt = backend.submit_sale(&submission()).await.unwrap();

        let Value::Object(fields) = json!({
            "orderId": "HACKED",
            "comments": "  entregar en la tarde ",
            "quantity": 3
        }) else {
            unreachable!()
        };
        backend.update_order(&receipt.order_id, fields).await.unwrap();

        let sale = backend.fetch_sales().await.unwrap().remove(0);
        assert_eq!(sale.order_id, "ORD-1");
        assert_eq!(sale.comments, "entregar en la tarde");
        assert_eq!(sale.quantity, 3);
    }

    #[tokio::test]
    async fn test_update_order_bad_value() {
        let backend = InMemoryBackend::new();
        let receipt = backend.submit_sale(&submission()).await.unwrap();

        let Value::Object(fields) = json!({"quantity": "tres"}) else {
            unreachable!()
        };
        assert!(matches!(
            backend.update_order(&receipt.order_id, fields).await,
            Err(RemoteError::InvalidRequest(_))
        ));
    }
}
