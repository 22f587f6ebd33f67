//! Sale records as read back from the spreadsheet endpoint.

use serde::{Deserialize, Serialize};

use super::customer::OrderType;

/// Status assigned to orders that have none.
pub const DEFAULT_STATUS: &str = "Pendiente";

/// Delivery marker for orders that have none.
pub const DEFAULT_DELIVERY: &str = "-";

/// Workflow labels used by the production team.
///
/// The set is open-ended; unknown labels are kept as-is.
pub const KNOWN_STATUSES: &[&str] = &[
    "Pendiente",
    "PendienteDiseño",
    "Drive",
    "Impreso",
    "En proceso",
    "Completado",
    "Entregado",
];

/// Check whether a status label is one of the known workflow labels.
pub fn is_known_status(status: &str) -> bool {
    let status = status.trim().to_lowercase();
    KNOWN_STATUSES.iter().any(|s| s.to_lowercase() == status)
}

/// A single order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Identifier assigned by the remote system.
    pub order_id: String,
    pub status: String,
    pub delivery: String,
    pub customer_name: String,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub business: String,
    pub product: String,
    pub quantity: u32,
    pub size: String,
    pub color: String,
    pub packaging: String,
    pub customization: String,
    pub comments: String,
    pub product_cost: f64,
    pub iva: f64,
    pub total: f64,
    pub timestamp: String,
    pub funnel: String,

    /// Variant-specific fields, tagged by `orderType`.
    #[serde(flatten)]
    pub details: SaleDetails,
}

/// Order variant payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "orderType")]
pub enum SaleDetails {
    #[serde(rename = "EA")]
    Shipping(ShippingDetails),
    #[serde(rename = "RA")]
    Pickup(PickupDetails),
}

/// Fields only present on shipping (EA) orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShippingDetails {
    pub expected_date: String,
    pub sale_date: String,
    pub courier: String,
    pub seller: String,
    pub province: String,
    pub canton: String,
    pub district: String,
    pub address: String,
    pub shipping_cost: f64,
}

/// Fields only present on pickup (RA) orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickupDetails {
    pub seller: String,
    pub agreed_date: String,
    pub pickup_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Default for Sale {
    fn default() -> Self {
        Self {
            order_id: String::new(),
            status: DEFAULT_STATUS.to_string(),
            delivery: DEFAULT_DELIVERY.to_string(),
            customer_name: String::new(),
            username: String::new(),
            phone: String::new(),
            email: String::new(),
            business: String::new(),
            product: String::new(),
            quantity: 0,
            size: String::new(),
            color: String::new(),
            packaging: String::new(),
            customization: String::new(),
            comments: String::new(),
            product_cost: 0.0,
            iva: 0.0,
            total: 0.0,
            timestamp: String::new(),
            funnel: String::new(),
            details: SaleDetails::Pickup(PickupDetails::default()),
        }
    }
}

impl Sale {
    pub fn order_type(&self) -> OrderType {
        match self.details {
            SaleDetails::Shipping(_) => OrderType::Shipping,
            SaleDetails::Pickup(_) => OrderType::Pickup,
        }
    }

    pub fn is_shipping(&self) -> bool {
        matches!(self.details, SaleDetails::Shipping(_))
    }

    pub fn seller(&self) -> &str {
        match &self.details {
            SaleDetails::Shipping(d) => &d.seller,
            SaleDetails::Pickup(d) => &d.seller,
        }
    }

    /// Delivery address, empty when the order has none.
    pub fn address(&self) -> &str {
        match &self.details {
            SaleDetails::Shipping(d) => &d.address,
            SaleDetails::Pickup(d) => d.address.as_deref().unwrap_or(""),
        }
    }

    /// Day of sale. Only shipping orders record it.
    pub fn sale_date(&self) -> Option<&str> {
        match &self.details {
            SaleDetails::Shipping(d) if !d.sale_date.is_empty() => Some(&d.sale_date),
            _ => None,
        }
    }

    pub fn shipping_cost(&self) -> f64 {
        match &self.details {
            SaleDetails::Shipping(d) => d.shipping_cost,
            SaleDetails::Pickup(_) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_status() {
        assert!(is_known_status("pendiente"));
        assert!(is_known_status("En Proceso"));
        assert!(!is_known_status("Perdido"));
    }

    #[test]
    fn test_sale_json_shape() {
        let sale = Sale {
            order_id: "A1".to_string(),
            details: SaleDetails::Shipping(ShippingDetails {
                courier: "Uber".to_string(),
                shipping_cost: 2500.0,
                ..Default::default()
            }),
            ..Default::default()
        };

        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["orderId"], "A1");
        assert_eq!(json["orderType"], "EA");
        assert_eq!(json["courier"], "Uber");
        assert_eq!(json["status"], "Pendiente");

        let back: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(back, sale);
    }

    #[test]
    fn test_accessors() {
        let pickup = Sale {
            details: SaleDetails::Pickup(PickupDetails {
                seller: "Web".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(pickup.order_type(), OrderType::Pickup);
        assert_eq!(pickup.seller(), "Web");
        assert_eq!(pickup.address(), "");
        assert_eq!(pickup.sale_date(), None);
        assert_eq!(pickup.shipping_cost(), 0.0);
    }
}
