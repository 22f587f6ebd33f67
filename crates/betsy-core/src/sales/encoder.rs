//! Canonical encoder for the delimited sales list.

use crate::models::sale::{Sale, SaleDetails};

use super::columns::{Column, COLUMN_COUNT, FIELD_SEPARATOR, RECORD_SEPARATOR};

/// Replace separator characters so a value cannot split its record.
fn escape(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            FIELD_SEPARATOR | RECORD_SEPARATOR | '\n' | '\r' => ' ',
            other => other,
        })
        .collect()
}

fn number(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        value.to_string()
    }
}

/// Encode one sale as a `|`-separated record, without terminator.
pub fn encode_record(sale: &Sale) -> String {
    let mut fields = vec![String::new(); COLUMN_COUNT];
    let mut set = |column: Column, value: String| fields[column.index()] = value;

    set(Column::OrderId, escape(&sale.order_id));
    set(Column::CustomerName, escape(&sale.customer_name));
    set(Column::Total, number(sale.total));
    set(Column::Timestamp, escape(&sale.timestamp));
    set(Column::OrderType, sale.order_type().code().to_string());
    set(Column::Phone, escape(&sale.phone));
    set(Column::Email, escape(&sale.email));
    set(Column::Address, escape(sale.address()));
    set(Column::Product, escape(&sale.product));
    set(Column::Status, escape(&sale.status));
    set(Column::Business, escape(&sale.business));
    set(Column::Funnel, escape(&sale.funnel));
    set(Column::Quantity, if sale.quantity == 0 { String::new() } else { sale.quantity.to_string() });
    set(Column::Size, escape(&sale.size));
    set(Column::Color, escape(&sale.color));
    set(Column::Packaging, escape(&sale.packaging));
    set(Column::Customization, escape(&sale.customization));
    set(Column::Comments, escape(&sale.comments));
    set(Column::ProductCost, number(sale.product_cost));
    set(Column::Iva, number(sale.iva));
    set(Column::Username, escape(&sale.username));

    match &sale.details {
        SaleDetails::Shipping(d) => {
            set(Column::ExpectedDate, escape(&d.expected_date));
            set(Column::SaleDate, escape(&d.sale_date));
            set(Column::Courier, escape(&d.courier));
            set(Column::SellerEa, escape(&d.seller));
            set(Column::Province, escape(&d.province));
            set(Column::Canton, escape(&d.canton));
            set(Column::District, escape(&d.district));
            set(Column::ShippingCost, number(d.shipping_cost));
        }
        SaleDetails::Pickup(d) => {
            set(Column::SellerRa, escape(&d.seller));
            set(Column::AgreedDate, escape(&d.agreed_date));
            set(Column::PickupDate, escape(&d.pickup_date));
        }
    }

    fields.join(&FIELD_SEPARATOR.to_string())
}

/// Encode sales in the endpoint's list format, `;` after every record.
pub fn encode_sales_blob(sales: &[Sale]) -> String {
    sales
        .iter()
        .map(|sale| format!("{}{}", encode_record(sale), RECORD_SEPARATOR))
        .collect()
}
