//! Decoder for the `;`/`|` delimited sales list.

use tracing::{debug, info, warn};

use crate::error::DecodeError;
use crate::models::customer::OrderType;
use crate::models::sale::{
    PickupDetails, Sale, SaleDetails, ShippingDetails, DEFAULT_DELIVERY, DEFAULT_STATUS,
};

use super::columns::{Column, Record, COLUMN_COUNT, RECORD_SEPARATOR};

/// Prefix the endpoint uses to report its own failures.
pub const REMOTE_ERROR_PREFIX: &str = "ERROR:";

/// Parse a number, falling back to 0 for empty, garbled or non-finite input.
pub fn coerce_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a quantity: coerced like any number, then truncated to a
/// non-negative integer.
pub fn coerce_quantity(raw: &str) -> u32 {
    let value = coerce_number(raw).trunc();
    if value <= 0.0 {
        0
    } else if value >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        value as u32
    }
}

/// Fall back to `default` when the value is blank.
pub(crate) fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.trim().to_string()
    }
}

/// Decode the delimited sales list.
///
/// Records are separated by `;` and fields by `|`. Short records are padded
/// with defaults. A body that is not a record list at all (an HTML page) is
/// rejected as a whole, as is the endpoint's own `ERROR:` answer.
pub fn decode_sales_blob(text: &str) -> Result<Vec<Sale>, DecodeError> {
    let body = text.trim_start();

    if let Some(message) = body.strip_prefix(REMOTE_ERROR_PREFIX) {
        return Err(DecodeError::Remote(message.trim().to_string()));
    }
    if body.starts_with('<') {
        warn!("Sales list body is a markup document");
        return Err(DecodeError::Malformed);
    }

    let sales: Vec<Sale> = body
        .split(RECORD_SEPARATOR)
        .filter(|segment| !segment.trim().is_empty())
        .map(decode_record)
        .collect();

    info!("Decoded {} sales", sales.len());
    Ok(sales)
}

/// Decode a single `|`-separated record.
pub fn decode_record(segment: &str) -> Sale {
    sale_from_record(&Record::parse(segment.trim()))
}

/// Build a sale from positional fields, applying defaults and coercion.
pub(crate) fn sale_from_record(record: &Record<'_>) -> Sale {
    if record.len() < COLUMN_COUNT {
        debug!(
            "Record {:?} has {} of {} columns",
            record.get(Column::OrderId),
            record.len(),
            COLUMN_COUNT
        );
    }

    let raw_type = record.get(Column::OrderType);
    let details = match OrderType::from_wire(raw_type) {
        OrderType::Shipping => SaleDetails::Shipping(ShippingDetails {
            expected_date: record.string(Column::ExpectedDate),
            sale_date: record.string(Column::SaleDate),
            courier: record.string(Column::Courier),
            seller: record.string(Column::SellerEa),
            province: record.string(Column::Province),
            canton: record.string(Column::Canton),
            district: record.string(Column::District),
            address: record.string(Column::Address),
            shipping_cost: coerce_number(record.get(Column::ShippingCost)),
        }),
        OrderType::Pickup => {
            if raw_type.trim() != OrderType::Pickup.code() {
                // Unknown codes are read as pickup orders; this can hide garbled rows.
                debug!(
                    "Record {:?} has order type {:?}, reading it as RA",
                    record.get(Column::OrderId),
                    raw_type
                );
            }
            let address = record.get(Column::Address);
            SaleDetails::Pickup(PickupDetails {
                seller: record.string(Column::SellerRa),
                agreed_date: record.string(Column::AgreedDate),
                pickup_date: record.string(Column::PickupDate),
                address: (!address.is_empty()).then(|| address.to_string()),
            })
        }
    };

    Sale {
        order_id: record.string(Column::OrderId),
        status: or_default(record.get(Column::Status), DEFAULT_STATUS),
        delivery: DEFAULT_DELIVERY.to_string(),
        customer_name: record.string(Column::CustomerName),
        username: record.string(Column::Username),
        phone: record.string(Column::Phone),
        email: record.string(Column::Email),
        business: record.string(Column::Business),
        product: record.string(Column::Product),
        quantity: coerce_quantity(record.get(Column::Quantity)),
        size: record.string(Column::Size),
        color: record.string(Column::Color),
        packaging: record.string(Column::Packaging),
        customization: record.string(Column::Customization),
        comments: record.string(Column::Comments),
        product_cost: coerce_number(record.get(Column::ProductCost)),
        iva: coerce_number(record.get(Column::Iva)),
        total: coerce_number(record.get(Column::Total)),
        timestamp: record.string(Column::Timestamp),
        funnel: record.string(Column::Funnel),
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const EA_EXAMPLE: &str =
        "A1|Juan|1000|2024-01-01T00:00:00Z|EA|8888-1234|a@b.com|Calle 1|Taza|Pendiente|Quark|Instagram;";

    #[test]
    fn test_empty_input() {
        assert!(decode_sales_blob("").unwrap().is_empty());
        assert!(decode_sales_blob(" ;\n; ").unwrap().is_empty());
    }

    #[test]
    fn test_single_ea_record() {
        let sales = decode_sales_blob(EA_EXAMPLE).unwrap();
        assert_eq!(sales.len(), 1);

        let sale = &sales[0];
        assert_eq!(sale.order_id, "A1");
        assert_eq!(sale.customer_name, "Juan");
        assert_eq!(sale.total, 1000.0);
        assert_eq!(sale.status, "Pendiente");
        assert_eq!(sale.order_type(), OrderType::Shipping);
        assert_eq!(sale.address(), "Calle 1");
        assert_eq!(sale.business, "Quark");
        assert_eq!(sale.funnel, "Instagram");
        assert_eq!(sale.delivery, "-");
        assert_eq!(sale.quantity, 0);
    }

    #[test]
    fn test_short_record_keeps_alignment() {
        let sales = decode_sales_blob("B2|Ana|2500").unwrap();
        let sale = &sales[0];

        assert_eq!(sale.order_id, "B2");
        assert_eq!(sale.customer_name, "Ana");
        assert_eq!(sale.total, 2500.0);
        assert_eq!(sale.timestamp, "");
        assert_eq!(sale.status, "Pendiente");
        assert_eq!(sale.phone, "");
    }

    #[test]
    fn test_missing_order_type_is_pickup() {
        let sales = decode_sales_blob("C3|Luis|10|2024-01-01").unwrap();
        assert_eq!(sales[0].order_type(), OrderType::Pickup);

        let sales = decode_sales_blob("C4|Luis|10|2024-01-01|XX|").unwrap();
        assert_eq!(sales[0].order_type(), OrderType::Pickup);
    }

    #[test]
    fn test_order_type_code_is_case_sensitive() {
        let sales = decode_sales_blob("A1|J|10|t|ea;A2|J|10|t|Ea;A3|J|10|t| EA ;").unwrap();
        assert_eq!(sales[0].order_type(), OrderType::Pickup);
        assert_eq!(sales[1].order_type(), OrderType::Pickup);
        assert_eq!(sales[2].order_type(), OrderType::Shipping);
    }

    #[test]
    fn test_non_numeric_columns() {
        let sales = decode_sales_blob("D4|Eva|mil|t|RA|||||||| dos ||||||abc").unwrap();
        let sale = &sales[0];

        assert_eq!(sale.total, 0.0);
        assert_eq!(sale.quantity, 0);
        assert_eq!(sale.product_cost, 0.0);
        assert_eq!(coerce_number("NaN"), 0.0);
        assert_eq!(coerce_number("inf"), 0.0);
        assert_eq!(coerce_number(" 12.5 "), 12.5);
        assert_eq!(coerce_quantity("3.9"), 3);
        assert_eq!(coerce_quantity("-2"), 0);
    }

    #[test]
    fn test_full_pickup_record() {
        let mut fields = vec![""; COLUMN_COUNT];
        fields[Column::OrderId.index()] = "R9";
        fields[Column::OrderType.index()] = "RA";
        fields[Column::Status.index()] = "Impreso";
        fields[Column::Quantity.index()] = "3";
        fields[Column::SellerEa.index()] = "Rafa";
        fields[Column::SellerRa.index()] = "Marlenn";
        fields[Column::AgreedDate.index()] = "2024-06-01";
        fields[Column::PickupDate.index()] = "2024-06-02";
        let blob = format!("{};", fields.join("|"));

        let sale = decode_sales_blob(&blob).unwrap().remove(0);
        assert_eq!(sale.status, "Impreso");
        assert_eq!(sale.quantity, 3);
        assert_eq!(
            sale.details,
            SaleDetails::Pickup(PickupDetails {
                seller: "Marlenn".to_string(),
                agreed_date: "2024-06-01".to_string(),
                pickup_date: "2024-06-02".to_string(),
                address: None,
            })
        );
    }

    #[test]
    fn test_markup_body_is_malformed() {
        let err = decode_sales_blob("<!DOCTYPE html><html>busy</html>").unwrap_err();
        assert_eq!(err, DecodeError::Malformed);
        assert_eq!(err.to_string(), "failed to parse sales data");
    }

    #[test]
    fn test_remote_error_prefix() {
        let err = decode_sales_blob("ERROR: sheet not found").unwrap_err();
        assert_eq!(err, DecodeError::Remote("sheet not found".to_string()));
    }
}
