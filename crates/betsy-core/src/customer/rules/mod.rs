//! Rule-based field extractors for pasted customer data.

pub mod labeled;
pub mod patterns;
pub mod positional;

pub use labeled::{field_strategies, LabeledExtractor, PatternExtractor};
pub use positional::{extract_positional, PositionalFields};

use serde::{Deserialize, Serialize};

use patterns::WHITESPACE;

/// Customer fields the parser tries to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerField {
    Name,
    Phone,
    Province,
    Canton,
    District,
    Email,
    Address,
}

impl CustomerField {
    /// All target fields, in declaration order.
    pub const ALL: [CustomerField; 7] = [
        Self::Name,
        Self::Phone,
        Self::Province,
        Self::Canton,
        Self::District,
        Self::Email,
        Self::Address,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Province => "province",
            Self::Canton => "canton",
            Self::District => "district",
            Self::Email => "email",
            Self::Address => "address",
        }
    }
}

/// Where a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOrigin {
    /// Value introduced by a label such as "Teléfono:".
    Labeled,
    /// Value recognized by its shape alone.
    Pattern,
    /// Value guessed from its line position.
    Positional,
}

/// A single extracted value with confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMatch {
    /// Extracted value, before cleanup.
    pub value: String,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    pub origin: MatchOrigin,
    /// Byte range in the searched text.
    pub position: Option<(usize, usize)>,
}

impl ExtractionMatch {
    pub fn new(value: impl Into<String>, confidence: f32, origin: MatchOrigin) -> Self {
        Self {
            value: value.into(),
            confidence,
            origin,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// Trait for field extraction strategies.
pub trait FieldExtractor {
    /// Extract the field from text, if this strategy recognizes it.
    fn extract(&self, text: &str) -> Option<ExtractionMatch>;
}

impl<E: FieldExtractor + ?Sized> FieldExtractor for Box<E> {
    fn extract(&self, text: &str) -> Option<ExtractionMatch> {
        (**self).extract(text)
    }
}

/// Run strategies in order; the first success wins.
pub fn first_match<E: FieldExtractor>(strategies: &[E], text: &str) -> Option<ExtractionMatch> {
    strategies.iter().find_map(|s| s.extract(text))
}

/// Collapse line breaks and whitespace runs into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Strip leading `:`/`-` punctuation, collapse whitespace and trim.
pub fn clean_value(value: &str) -> String {
    let stripped = value.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
    normalize_whitespace(stripped).trim().to_string()
}

/// Remove dashes and spaces from a phone number.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| *c != '-' && !c.is_whitespace()).collect()
}

/// Lowercase and strip Spanish diacritics for loose comparisons.
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_value() {
        assert_eq!(clean_value(": - Ana   Perez "), "Ana Perez");
        assert_eq!(clean_value("---"), "");
        assert_eq!(clean_value("San\nJosé"), "San José");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("8888-1234"), "88881234");
        assert_eq!(normalize_phone("+506 8888 12 34"), "+50688881234");
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("San JOSÉ, Limón"), "san jose, limon");
    }

    #[test]
    fn test_first_match_order() {
        let strategies = field_strategies(CustomerField::Email);
        let m = first_match(&strategies, "Correo: uno@a.com y dos@b.com").unwrap();
        assert_eq!(m.value, "uno@a.com");
        assert_eq!(m.origin, MatchOrigin::Labeled);

        let m = first_match(&strategies, "escriba a dos@b.com gracias").unwrap();
        assert_eq!(m.value, "dos@b.com");
        assert_eq!(m.origin, MatchOrigin::Pattern);
    }
}
