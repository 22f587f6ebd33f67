//! Label-anchored and shape-based extractors.

use regex::Regex;

use super::patterns::{
    ADDRESS_LABELED, CANTON_LABELED, DISTRICT_LABELED, EMAIL, EMAIL_LABELED, NAME_LABELED,
    PHONE_LABELED, PROVINCE_LABELED,
};
use super::{CustomerField, ExtractionMatch, FieldExtractor, MatchOrigin};

/// Extracts the first capture group of a label-anchored pattern.
pub struct LabeledExtractor {
    pattern: &'static Regex,
}

impl LabeledExtractor {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for LabeledExtractor {
    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        self.pattern.captures_iter(text).find_map(|caps| {
            let value = caps.get(1)?;
            if value.as_str().trim().is_empty() {
                return None;
            }
            Some(
                ExtractionMatch::new(value.as_str(), 0.95, MatchOrigin::Labeled)
                    .with_position(value.start(), value.end()),
            )
        })
    }
}

/// Extracts the whole match of a pattern that recognizes a value by shape.
pub struct PatternExtractor {
    pattern: &'static Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &'static Regex) -> Self {
        Self { pattern }
    }
}

impl FieldExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        let m = self.pattern.find(text)?;
        Some(ExtractionMatch::new(m.as_str(), 0.7, MatchOrigin::Pattern).with_position(m.start(), m.end()))
    }
}

/// Ordered strategies for a field; the first success wins.
pub fn field_strategies(field: CustomerField) -> Vec<Box<dyn FieldExtractor + Send + Sync>> {
    match field {
        CustomerField::Name => vec![Box::new(LabeledExtractor::new(&NAME_LABELED))],
        CustomerField::Phone => vec![Box::new(LabeledExtractor::new(&PHONE_LABELED))],
        CustomerField::Province => vec![Box::new(LabeledExtractor::new(&PROVINCE_LABELED))],
        CustomerField::Canton => vec![Box::new(LabeledExtractor::new(&CANTON_LABELED))],
        CustomerField::District => vec![Box::new(LabeledExtractor::new(&DISTRICT_LABELED))],
        CustomerField::Email => vec![
            Box::new(LabeledExtractor::new(&EMAIL_LABELED)),
            Box::new(PatternExtractor::new(&EMAIL)),
        ],
        CustomerField::Address => vec![Box::new(LabeledExtractor::new(&ADDRESS_LABELED))],
    }
}
