//! WASM bindings for Betsy CRM.
//!
//! This crate provides WebAssembly bindings for the sales form running in
//! browsers: customer text parsing, sales list decoding, totals and stats.

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use betsy_core::models::sale::is_known_status;
use betsy_core::{
    CustomerInfo, CustomerParser, CustomerTextParser, DailyStats, OrderType, ProductInfo, Sale,
    SaleSubmission, SalesSummary,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Serialize to plain JS objects (no `Map`s).
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The current customer form, or an empty one when `undefined`/`null`.
fn previous_customer(previous: JsValue) -> Result<CustomerInfo, JsValue> {
    if previous.is_undefined() || previous.is_null() {
        Ok(CustomerInfo::default())
    } else {
        from_js(previous)
    }
}

fn decoded(sales: Vec<Sale>) -> Result<JsValue, JsValue> {
    for sale in sales.iter().filter(|s| !is_known_status(&s.status)) {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "Order {} has unknown status {:?}",
            sale.order_id, sale.status
        )));
    }
    to_js(&sales)
}

/// Extract customer fields from pasted text.
///
/// Fields the text does not mention keep their value from `previous`.
#[wasm_bindgen]
pub fn parse_customer_text(text: &str, previous: JsValue) -> Result<JsValue, JsValue> {
    let previous = previous_customer(previous)?;
    to_js(&betsy_core::parse_customer_text(text, &previous))
}

/// Decode the delimited sales list returned by the endpoint.
#[wasm_bindgen]
pub fn decode_sales_blob(text: &str) -> Result<JsValue, JsValue> {
    let sales =
        betsy_core::decode_sales_blob(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
    decoded(sales)
}

/// Decode a full list response body (JSON envelope or delimited text).
#[wasm_bindgen]
pub fn decode_list_response(body: &str) -> Result<JsValue, JsValue> {
    let sales =
        betsy_core::decode_list_response(body).map_err(|e| JsValue::from_str(&e.to_string()))?;
    decoded(sales)
}

/// Compute `{ tax, total }` for an order.
#[wasm_bindgen]
pub fn compute_total(
    cost: f64,
    quantity: u32,
    shipping_cost: f64,
    apply_iva: bool,
    is_shipping_order: bool,
) -> Result<JsValue, JsValue> {
    to_js(&betsy_core::compute_total(
        cost,
        quantity,
        shipping_cost,
        apply_iva,
        is_shipping_order,
    ))
}

/// Format an amount in colones (₡1 234,56).
#[wasm_bindgen]
pub fn format_colones(amount: f64) -> String {
    betsy_core::format_colones(amount)
}

/// Summary over a decoded sales list.
#[wasm_bindgen]
pub fn sales_summary(sales: JsValue) -> Result<JsValue, JsValue> {
    let sales: Vec<Sale> = from_js(sales)?;
    to_js(&SalesSummary::from_sales(&sales))
}

/// Figures for one day (`YYYY-MM-DD`) in the given UTC offset.
#[wasm_bindgen]
pub fn daily_stats(sales: JsValue, day: &str, utc_offset_hours: i32) -> Result<JsValue, JsValue> {
    let sales: Vec<Sale> = from_js(sales)?;
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("invalid day {}: {}", day, e)))?;
    let offset = utc_offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| JsValue::from_str("UTC offset out of range"))?;

    to_js(&DailyStats::for_day(&sales, day, &offset))
}

/// Customer parser class for browser use.
#[wasm_bindgen]
pub struct CustomerExtractor {
    parser: CustomerTextParser,
}

#[wasm_bindgen]
impl CustomerExtractor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: CustomerTextParser::new(),
        }
    }

    /// Minimum length for a line to count as an address in unlabeled text.
    #[wasm_bindgen]
    pub fn set_address_min_length(&mut self, length: usize) {
        self.parser = CustomerTextParser::new().with_address_min_length(length);
    }

    /// Extract the customer record only.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str, previous: JsValue) -> Result<JsValue, JsValue> {
        let previous = previous_customer(previous)?;
        to_js(&self.parser.parse(text, &previous).customer)
    }

    /// Extract with mode, missing fields and per-field confidence.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str, previous: JsValue) -> Result<JsValue, JsValue> {
        let previous = previous_customer(previous)?;
        to_js(&self.parser.parse(text, &previous))
    }
}

impl Default for CustomerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct PreparedSubmission {
    submission: SaleSubmission,
    issues: Vec<String>,
}

/// Build a submission stamped with the browser clock.
///
/// Returns `{ submission, issues }`; an empty `issues` list means the
/// submission can be posted as-is.
#[wasm_bindgen]
pub fn prepare_submission(
    customer: JsValue,
    product: JsValue,
    apply_iva: bool,
) -> Result<JsValue, JsValue> {
    let customer: CustomerInfo = from_js(customer)?;
    let product: ProductInfo = from_js(product)?;
    let timestamp = String::from(js_sys::Date::new_0().to_iso_string());

    let submission = SaleSubmission::with_timestamp(customer, product, apply_iva, timestamp);
    let issues = submission.validate();
    to_js(&PreparedSubmission { submission, issues })
}

/// Utilities for the order form.
#[wasm_bindgen]
pub struct OrderFormUtils;

#[wasm_bindgen]
impl OrderFormUtils {
    /// Whether an order type code is the shipping variant (`EA`).
    #[wasm_bindgen]
    pub fn is_shipping(order_type: &str) -> bool {
        OrderType::from_code(order_type).is_some_and(|t| t.is_shipping())
    }

    /// Whether a status label is one of the workflow labels.
    #[wasm_bindgen]
    pub fn is_known_status(status: &str) -> bool {
        is_known_status(status)
    }

    /// IVA rate as a decimal (0.13).
    #[wasm_bindgen]
    pub fn iva_rate() -> f64 {
        betsy_core::IVA_RATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use betsy_core::Totals;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_colones() {
        assert_eq!(format_colones(1234.56), "₡1 234,56");
    }

    #[wasm_bindgen_test]
    fn test_compute_total() {
        let totals: Totals = from_js(compute_total(100.0, 2, 50.0, true, true).unwrap()).unwrap();
        assert_eq!(totals.total, 276.0);
    }

    #[wasm_bindgen_test]
    fn test_decode_and_summarize() {
        let sales = decode_sales_blob("A1|Juan|1000|2024-01-01T15:00:00Z|EA;R1|Ana|500||RA;")
            .unwrap();
        let summary: SalesSummary = from_js(sales_summary(sales).unwrap()).unwrap();

        assert_eq!(summary.total_sales, 2);
        assert_eq!(summary.pickup_sales, 1);
        assert_eq!(summary.total_amount, 1500.0);
    }

    #[wasm_bindgen_test]
    fn test_daily_stats_offset_range() {
        let sales = || decode_sales_blob("A1|Juan|1000|2024-01-01T15:00:00Z|EA;").unwrap();

        let stats: DailyStats = from_js(daily_stats(sales(), "2024-01-01", -6).unwrap()).unwrap();
        assert_eq!(stats.total_sales, 1);

        assert!(daily_stats(sales(), "2024-01-01", i32::MAX).is_err());
        assert!(daily_stats(sales(), "2024-01-01", 30).is_err());
    }

    #[wasm_bindgen_test]
    fn test_parse_keeps_previous() {
        let value = parse_customer_text("Teléfono: 8888-1234", JsValue::UNDEFINED).unwrap();
        let customer: CustomerInfo = from_js(value).unwrap();
        assert_eq!(customer.phone, "88881234");
        assert_eq!(customer.name, "");
    }

    #[wasm_bindgen_test]
    fn test_order_form_utils() {
        assert!(OrderFormUtils::is_shipping("ea"));
        assert!(!OrderFormUtils::is_shipping("RA"));
        assert!(OrderFormUtils::is_known_status("impreso"));
    }
}
