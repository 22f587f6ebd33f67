//! Customer text parser combining labeled patterns and a positional fallback.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ParserConfig;
use crate::models::customer::CustomerInfo;

use super::rules::{
    clean_value, extract_positional, field_strategies, first_match, normalize_phone,
    normalize_whitespace, CustomerField, ExtractionMatch, MatchOrigin,
};
use super::CustomerParser;

/// How the fields of a parse were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// At least one field was introduced by a label.
    Labeled,
    /// No labels; fields were guessed from line positions.
    Positional,
    /// Nothing recognizable.
    Empty,
}

/// Result of customer text parsing.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerExtraction {
    /// Customer record with the parsed fields filled in.
    pub customer: CustomerInfo,
    /// Text the parser received.
    pub raw_text: String,
    pub mode: ParseMode,
    /// Target fields left empty.
    pub missing_fields: Vec<CustomerField>,
    /// Confidence of each field that was found.
    pub field_confidence: BTreeMap<CustomerField, f32>,
}

/// Layered customer text parser.
#[derive(Debug, Clone)]
pub struct CustomerTextParser {
    /// Minimum length for a plain line to count as an address.
    address_min_length: usize,
}

impl CustomerTextParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self {
            address_min_length: ParserConfig::default().address_min_length,
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new().with_address_min_length(config.address_min_length)
    }

    /// Set the positional address length threshold.
    pub fn with_address_min_length(mut self, length: usize) -> Self {
        self.address_min_length = length;
        self
    }

    fn clean(field: CustomerField, m: &ExtractionMatch) -> String {
        let value = clean_value(&m.value);
        match field {
            CustomerField::Phone => normalize_phone(&value),
            CustomerField::Email => value.trim_end_matches(['.', ')']).to_string(),
            _ => value,
        }
    }
}

impl Default for CustomerTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerParser for CustomerTextParser {
    fn parse(&self, raw: &str, previous: &CustomerInfo) -> CustomerExtraction {
        let normalized = normalize_whitespace(raw);

        let mut found: BTreeMap<CustomerField, ExtractionMatch> = BTreeMap::new();
        for field in CustomerField::ALL {
            if let Some(m) = first_match(&field_strategies(field), &normalized) {
                debug!("{} matched {:?} ({:?})", field.as_str(), m.value, m.origin);
                found.insert(field, m);
            }
        }

        let labeled = found.values().any(|m| m.origin == MatchOrigin::Labeled);
        if !labeled {
            let positional = extract_positional(raw, self.address_min_length);
            for field in CustomerField::ALL {
                if found.contains_key(&field) {
                    continue;
                }
                if let Some(m) = positional.get(field) {
                    debug!("{} guessed from position: {:?}", field.as_str(), m.value);
                    found.insert(field, m.clone());
                }
            }
        }

        let mut customer = previous.clone();
        let mut field_confidence = BTreeMap::new();
        let mut missing_fields = Vec::new();

        for field in CustomerField::ALL {
            let value = found
                .get(&field)
                .map(|m| Self::clean(field, m))
                .unwrap_or_default();

            if value.is_empty() {
                missing_fields.push(field);
            } else if let Some(m) = found.get(&field) {
                field_confidence.insert(field, m.confidence);
            }

            let slot = match field {
                CustomerField::Name => &mut customer.name,
                CustomerField::Phone => &mut customer.phone,
                CustomerField::Province => &mut customer.province,
                CustomerField::Canton => &mut customer.canton,
                CustomerField::District => &mut customer.district,
                CustomerField::Email => &mut customer.email,
                CustomerField::Address => &mut customer.address,
            };
            *slot = value;
        }

        let mode = if labeled {
            ParseMode::Labeled
        } else if field_confidence.is_empty() {
            ParseMode::Empty
        } else {
            ParseMode::Positional
        };

        info!(
            "Parsed customer text: {:?} mode, {} of {} fields",
            mode,
            field_confidence.len(),
            CustomerField::ALL.len()
        );

        CustomerExtraction {
            customer,
            raw_text: raw.to_string(),
            mode,
            missing_fields,
            field_confidence,
        }
    }
}
