//! Free-text customer parsing.

mod parser;
pub mod rules;

pub use parser::{CustomerExtraction, CustomerTextParser, ParseMode};
pub use rules::CustomerField;

use crate::models::customer::CustomerInfo;

/// Trait for customer text parsers.
pub trait CustomerParser {
    /// Parse pasted text on top of the previous form state. Never fails.
    fn parse(&self, raw: &str, previous: &CustomerInfo) -> CustomerExtraction;
}

/// Parse pasted customer text with the default parser.
///
/// Name, phone, location, email and address are replaced by what the text
/// yields (empty when not found); every other field is carried over from
/// `previous`.
pub fn parse_customer_text(raw: &str, previous: &CustomerInfo) -> CustomerInfo {
    CustomerTextParser::new().parse(raw, previous).customer
}
