//! Line-based fallback for unlabeled customer blocks.
//!
//! Typical input is a block copied from a chat:
//!
//! ```text
//! Ana Perez
//! 8888-1234
//! ana@x.com
//! Heredia, 200 m norte de la iglesia, casa azul
//! ```

use super::patterns::{ADDRESS_KEYWORDS, EMAIL, PHONE_LINE, PROVINCES};
use super::{fold_accents, CustomerField, ExtractionMatch, MatchOrigin};

const POSITIONAL_CONFIDENCE: f32 = 0.5;

/// Values guessed from line positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionalFields {
    pub name: Option<ExtractionMatch>,
    pub phone: Option<ExtractionMatch>,
    pub email: Option<ExtractionMatch>,
    pub province: Option<ExtractionMatch>,
    pub address: Option<ExtractionMatch>,
}

impl PositionalFields {
    pub fn get(&self, field: CustomerField) -> Option<&ExtractionMatch> {
        match field {
            CustomerField::Name => self.name.as_ref(),
            CustomerField::Phone => self.phone.as_ref(),
            CustomerField::Email => self.email.as_ref(),
            CustomerField::Province => self.province.as_ref(),
            CustomerField::Address => self.address.as_ref(),
            CustomerField::Canton | CustomerField::District => None,
        }
    }
}

fn positional(value: &str) -> ExtractionMatch {
    ExtractionMatch::new(value, POSITIONAL_CONFIDENCE, MatchOrigin::Positional)
}

/// Whether a line looks like a bare phone number.
pub fn is_phone_line(line: &str) -> bool {
    PHONE_LINE.is_match(line) && line.chars().filter(char::is_ascii_digit).count() >= 7
}

/// Canonical name of the first province mentioned in a line.
pub fn find_province(line: &str) -> Option<&'static str> {
    let folded = fold_accents(line);
    PROVINCES
        .iter()
        .find(|(_, key)| contains_word(&folded, key))
        .map(|(name, _)| *name)
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Guess fields from the non-normalized lines of `text`.
pub fn extract_positional(text: &str, address_min_length: usize) -> PositionalFields {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut fields = PositionalFields::default();

    let Some((&first, rest)) = lines.split_first() else {
        return fields;
    };
    fields.name = Some(positional(first));

    let mut used = vec![false; rest.len()];

    if let Some(i) = rest.iter().position(|l| is_phone_line(l)) {
        fields.phone = Some(positional(rest[i]));
        used[i] = true;
    }

    if let Some(i) = rest.iter().position(|l| l.contains('@')) {
        let token = EMAIL.find(rest[i]).map_or(rest[i], |m| m.as_str());
        fields.email = Some(positional(token));
        used[i] = true;
    }

    if let Some(province) = lines.iter().find_map(|l| find_province(l)) {
        fields.province = Some(positional(province));
    }

    fields.address = rest
        .iter()
        .zip(&used)
        .find(|(line, used)| {
            !**used
                && (find_province(line).is_some()
                    || ADDRESS_KEYWORDS.is_match(line)
                    || line.chars().count() > address_min_length)
        })
        .map(|(line, _)| positional(line));

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_block() {
        let text = "Ana Perez\n8888-1234\nana@x.com\nHeredia, 200 m norte de la iglesia, casa azul\n";
        let fields = extract_positional(text, 50);

        assert_eq!(fields.name.unwrap().value, "Ana Perez");
        assert_eq!(fields.phone.unwrap().value, "8888-1234");
        assert_eq!(fields.email.unwrap().value, "ana@x.com");
        assert_eq!(fields.province.unwrap().value, "Heredia");
        assert_eq!(
            fields.address.unwrap().value,
            "Heredia, 200 m norte de la iglesia, casa azul"
        );
    }

    #[test]
    fn test_email_token_inside_line() {
        let fields = extract_positional("Luis\ncorreo luis@mail.com por favor", 50);
        assert_eq!(fields.email.unwrap().value, "luis@mail.com");
        assert!(fields.address.is_none());
    }

    #[test]
    fn test_long_line_is_address() {
        let long = "Del parque central cuatrocientos sur y cien oeste, portón negro";
        let fields = extract_positional(&format!("Marta\n{}", long), 50);
        assert_eq!(fields.address.unwrap().value, long);
    }

    #[test]
    fn test_short_digit_line_is_not_phone() {
        assert!(!is_phone_line("12-34"));
        assert!(is_phone_line("+506 8888 1234"));
    }

    #[test]
    fn test_find_province_accent_insensitive() {
        assert_eq!(find_province("vivo en san jose centro"), Some("San José"));
        assert_eq!(find_province("LIMÓN"), Some("Limón"));
        assert_eq!(find_province("Sanjoseño"), None);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract_positional("  \n\n", 50), PositionalFields::default());
    }
}
