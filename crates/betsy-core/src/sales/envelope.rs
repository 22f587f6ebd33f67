//! Reader for list responses: JSON envelope or raw delimited blob.

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::DecodeError;
use crate::models::sale::Sale;

use super::columns::{Column, Record};
use super::decoder::{decode_sales_blob, sale_from_record};

/// `{status, data}` envelope returned by newer script deployments.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: Value,
    #[serde(default, alias = "message")]
    error: Option<String>,
}

/// Render a JSON value as the text the delimited format would carry.
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
    }
}

fn sale_from_object(object: &Map<String, Value>) -> Sale {
    let texts: Vec<String> = Column::ALL
        .iter()
        .map(|column| field_text(object.get(column.json_key())))
        .collect();
    let record = Record::from_fields(texts.iter().map(String::as_str).collect());
    sale_from_record(&record)
}

fn decode_envelope(envelope: ListEnvelope) -> Result<Vec<Sale>, DecodeError> {
    if envelope.status.eq_ignore_ascii_case("error") {
        let message = envelope.error.unwrap_or_else(|| "unknown error".to_string());
        return Err(DecodeError::Remote(message));
    }

    match envelope.data {
        Value::Null => Ok(Vec::new()),
        Value::String(blob) => decode_sales_blob(&blob),
        Value::Array(items) => {
            let mut sales = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(object) => sales.push(sale_from_object(object)),
                    Value::String(segment) if !segment.trim().is_empty() => {
                        sales.extend(decode_sales_blob(segment)?)
                    }
                    other => debug!("Skipping list item {}: {}", i, other),
                }
            }
            info!("Decoded {} sales from envelope", sales.len());
            Ok(sales)
        }
        other => Err(DecodeError::Envelope(format!(
            "expected a list in `data`, found {}",
            other
        ))),
    }
}

/// Decode a list response body.
///
/// JSON envelopes (`{"status": ..., "data": [...]}`) are read with the same
/// defaults and coercion as the delimited format; any other body is
/// decoded as the delimited blob.
pub fn decode_list_response(body: &str) -> Result<Vec<Sale>, DecodeError> {
    let trimmed = body.trim_start();
    if !trimmed.starts_with('{') {
        return decode_sales_blob(body);
    }

    let envelope: ListEnvelope =
        serde_json::from_str(trimmed).map_err(|e| DecodeError::Envelope(e.to_string()))?;
    decode_envelope(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::customer::OrderType;

    #[test]
    fn test_envelope_with_objects() {
        let body = r#"{
            "status": "success",
            "data": [
                {"orderId": "A1", "customerName": "Juan", "total": 1000, "orderType": "EA",
                 "shippingCost": "2500", "seller": "Rafa", "quantity": "2"},
                {"orderId": "R1", "total": "abc", "orderType": "RA", "address": ""}
            ]
        }"#;
        let sales = decode_list_response(body).unwrap();

        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].total, 1000.0);
        assert_eq!(sales[0].shipping_cost(), 2500.0);
        assert_eq!(sales[0].seller(), "Rafa");
        assert_eq!(sales[0].quantity, 2);
        assert_eq!(sales[0].status, "Pendiente");

        assert_eq!(sales[1].order_type(), OrderType::Pickup);
        assert_eq!(sales[1].total, 0.0);
        assert_eq!(sales[1].address(), "");
    }

    #[test]
    fn test_envelope_error() {
        let err = decode_list_response(r#"{"status": "error", "error": "quota"}"#).unwrap_err();
        assert_eq!(err, DecodeError::Remote("quota".to_string()));
    }

    #[test]
    fn test_envelope_with_blob_data() {
        let body = r#"{"status": "success", "data": "A1|Juan|1000||EA;B2|Ana|5"}"#;
        let sales = decode_list_response(body).unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[1].order_type(), OrderType::Pickup);
    }

    #[test]
    fn test_invalid_envelope() {
        let err = decode_list_response(r#"{"status": "success", "data": 5}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Envelope(_)));

        let err = decode_list_response("{not json").unwrap_err();
        assert!(matches!(err, DecodeError::Envelope(_)));
    }

    #[test]
    fn test_plain_blob_passthrough() {
        let sales = decode_list_response("A1|Juan|1000|2024-01-01T00:00:00Z|EA;").unwrap();
        assert_eq!(sales[0].order_id, "A1");
    }
}
