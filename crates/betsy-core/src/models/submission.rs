//! Payload sent to the spreadsheet endpoint when a sale is registered.

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::customer::{CustomerInfo, OrderType};
use super::product::{Courier, Packaging, ProductInfo, Seller};
use super::sale::{PickupDetails, Sale, SaleDetails, ShippingDetails};

/// A new sale ready to be posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSubmission {
    pub customer_info: CustomerInfo,
    pub product_info: ProductInfo,
    /// RFC 3339 creation time.
    pub timestamp: String,
}

/// Successful answer to a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub order_id: String,
}

impl SaleSubmission {
    /// Build a submission stamped with the current time.
    pub fn new(customer: CustomerInfo, product: ProductInfo, apply_iva: bool) -> Self {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        Self::with_timestamp(customer, product, apply_iva, timestamp)
    }

    /// Build a submission with an explicit timestamp. Totals are recomputed.
    pub fn with_timestamp(
        customer: CustomerInfo,
        mut product: ProductInfo,
        apply_iva: bool,
        timestamp: impl Into<String>,
    ) -> Self {
        product.recalculate(apply_iva, customer.order_type);
        Self {
            customer_info: customer,
            product_info: product,
            timestamp: timestamp.into(),
        }
    }

    pub fn order_type(&self) -> OrderType {
        self.customer_info.order_type
    }

    /// The record the endpoint stores for this submission.
    pub fn to_sale(&self, order_id: impl Into<String>) -> Sale {
        let c = &self.customer_info;
        let p = &self.product_info;

        let details = match c.order_type {
            OrderType::Shipping => SaleDetails::Shipping(ShippingDetails {
                expected_date: c.expected_date.clone(),
                sale_date: c.sale_date.clone(),
                courier: p.courier.label().to_string(),
                seller: p.seller.label().to_string(),
                province: c.province.clone(),
                canton: c.canton.clone(),
                district: c.district.clone(),
                address: c.address.clone(),
                shipping_cost: p.shipping_cost,
            }),
            OrderType::Pickup => SaleDetails::Pickup(PickupDetails {
                seller: p.seller.label().to_string(),
                agreed_date: c.agreed_date.clone(),
                pickup_date: c.pickup_date.clone(),
                address: (!c.address.trim().is_empty()).then(|| c.address.clone()),
            }),
        };

        Sale {
            order_id: order_id.into(),
            customer_name: c.name.clone(),
            username: c.username.clone(),
            phone: c.phone.clone(),
            email: c.email.clone(),
            business: c.business.clone(),
            product: p.product.clone(),
            quantity: p.quantity,
            size: p.size.clone(),
            color: p.color.clone(),
            packaging: p.packaging.label().to_string(),
            customization: p.customization.clone(),
            comments: p.comments.clone(),
            product_cost: p.product_cost,
            iva: p.iva,
            total: p.total,
            timestamp: self.timestamp.clone(),
            funnel: c.funnel.label().to_string(),
            details,
            ..Default::default()
        }
    }

    /// Check the submission for missing or malformed inputs.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let c = &self.customer_info;
        let p = &self.product_info;

        let mut require = |value: &str, label: &str| {
            if value.trim().is_empty() {
                issues.push(format!("Missing {}", label));
            }
        };

        require(&c.name, "customer name");
        require(&c.phone, "phone");
        require(&c.email, "email");
        require(&c.username, "username");
        require(&c.business, "business");
        require(&p.product, "product");
        require(&p.color, "color");
        require(&p.size, "size");

        match c.order_type {
            OrderType::Shipping => {
                require(&c.province, "province");
                require(&c.canton, "canton");
                require(&c.district, "district");
                require(&c.address, "address");
                require(&c.sale_date, "sale date");
                require(&c.expected_date, "expected delivery date");
            }
            OrderType::Pickup => {
                require(&c.agreed_date, "agreed date");
                require(&c.pickup_date, "pickup date");
            }
        }

        if p.packaging == Packaging::Unset {
            issues.push("Missing packaging".to_string());
        }
        if p.seller == Seller::Unset {
            issues.push("Missing seller".to_string());
        }
        if c.order_type.is_shipping() && p.courier == Courier::Unset {
            issues.push("Missing courier".to_string());
        }
        if p.quantity == 0 {
            issues.push("Quantity must be at least 1".to_string());
        }
        if p.product_cost < 0.0 || p.shipping_cost < 0.0 {
            issues.push("Costs cannot be negative".to_string());
        }

        let dates = [
            (&c.sale_date, "sale date"),
            (&c.expected_date, "expected delivery date"),
            (&c.agreed_date, "agreed date"),
            (&c.pickup_date, "pickup date"),
        ];
        for (value, label) in dates {
            if !value.is_empty() && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                issues.push(format!("Invalid {}: {} (expected YYYY-MM-DD)", label, value));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_pickup() -> SaleSubmission {
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
            quantity: 2,
            product_cost: 100.0,
            shipping_cost: 50.0,
            seller: Seller::Web,
            ..Default::default()
        };
        SaleSubmission::with_timestamp(customer, product, true, "2024-05-01T10:00:00.000Z")
    }

    #[test]
    fn test_totals_recomputed() {
        let submission = complete_pickup();
        assert_eq!(submission.product_info.iva, 26.0);
        assert_eq!(submission.product_info.total, 226.0);
    }

    #[test]
    fn test_valid_pickup() {
        assert!(complete_pickup().validate().is_empty());
    }

    #[test]
    fn test_shipping_requires_address_and_courier() {
        let mut submission = complete_pickup();
        submission.customer_info.order_type = OrderType::Shipping;

        let issues = submission.validate();
        assert!(issues.contains(&"Missing address".to_string()));
        assert!(issues.contains(&"Missing courier".to_string()));
        assert!(issues.contains(&"Missing sale date".to_string()));
    }

    #[test]
    fn test_invalid_date_format() {
        let mut submission = complete_pickup();
        submission.customer_info.pickup_date = "03/05/2024".to_string();

        let issues = submission.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].starts_with("Invalid pickup date"));
    }

    #[test]
    fn test_to_sale() {
        let sale = complete_pickup().to_sale("ORD-1");
        assert_eq!(sale.order_id, "ORD-1");
        assert_eq!(sale.status, "Pendiente");
        assert_eq!(sale.seller(), "Web");
        assert_eq!(sale.packaging, "Normal");
        assert_eq!(sale.total, 226.0);
        assert_eq!(sale.shipping_cost(), 0.0);
        assert_eq!(sale.address(), "");
    }

    #[test]
    fn test_payload_shape() {
        let json = serde_json::to_value(complete_pickup()).unwrap();
        assert_eq!(json["customerInfo"]["name"], "Ana Perez");
        assert_eq!(json["productInfo"]["cantidad"], 2);
        assert_eq!(json["timestamp"], "2024-05-01T10:00:00.000Z");
    }
}
