//! Regex patterns for pasted customer data (Costa Rican contact forms).

use lazy_static::lazy_static;
use regex::Regex;

/// Labels that end the value of the preceding label.
const LABEL_STOP: &str = r"Nombre|Tel[ée]fono|Tel|Celular|Cel|M[óo]vil|Provincia|Cant[óo]n|Distrito|E-?mail|Correo|Direcci[óo]n|Se[ñn]as|Usuario|Rango|Horas?|Horario";

lazy_static! {
    // Name. "Nombre de usuario" is a handle label and yields no capture.
    pub static ref NAME_LABELED: Regex = Regex::new(&format!(
        r"(?i)\bNombre(?:\s+de\s+usuario\b|(?:\s+completo)?\s*[:\-]?\s*([\p{{L}}\s'.]+?)\s*(?:[,;|/:]|\d|[\w.+\-]*@|\b(?:{})\b|\b\p{{L}}+\s*:|$))",
        LABEL_STOP
    )).unwrap();

    // Phone
    pub static ref PHONE_LABELED: Regex = Regex::new(
        r"(?i)\b(?:Tel[ée]fono|Tel[ée]f|Tel|Celular|Cel|M[óo]vil)\b\.?\s*[:\-]?\s*(\+?(?:506[\s\-]?)?\d{4}[\s\-]?\d{4})\b"
    ).unwrap();

    // Location
    pub static ref PROVINCE_LABELED: Regex = Regex::new(&format!(
        r"(?i)\bProvincia\s*[:\-]?\s*([^,;|\d]+?)\s*(?:[,;|]|\d|\b(?:{})\b|$)",
        LABEL_STOP
    )).unwrap();

    pub static ref CANTON_LABELED: Regex = Regex::new(&format!(
        r"(?i)\bCant[óo]n\s*[:\-]?\s*([^,;|\d]+?)\s*(?:[,;|]|\d|\b(?:{})\b|$)",
        LABEL_STOP
    )).unwrap();

    pub static ref DISTRICT_LABELED: Regex = Regex::new(&format!(
        r"(?i)\bDistrito\s*[:\-]?\s*([^,;|\d]+?)\s*(?:[,;|]|\d|\b(?:{})\b|$)",
        LABEL_STOP
    )).unwrap();

    // Email
    pub static ref EMAIL_LABELED: Regex = Regex::new(
        r"(?i)\b(?:E-?mail|Correo(?:\s+electr[óo]nico)?)\s*[:\-]?\s*([^\s,;|]+@[^\s,;|]+)"
    ).unwrap();

    pub static ref EMAIL: Regex = Regex::new(
        r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}"
    ).unwrap();

    // Address (may contain commas and digits)
    pub static ref ADDRESS_LABELED: Regex = Regex::new(&format!(
        r"(?i)\b(?:Direcci[óo]n(?:\s+exacta|\s+completa|\s+de\s+entrega)?|donde\s+desea\s+recibir\s+el\s+pedido|Se[ñn]as)\s*[:\-]?\s*([^,\s][^|;]*?)\s*(?:[|;]|\b(?:{})\b|$)",
        LABEL_STOP
    )).unwrap();

    // Positional fallback
    pub static ref PHONE_LINE: Regex = Regex::new(
        r"^\+?[\d\-\s().]+$"
    ).unwrap();

    pub static ref ADDRESS_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:casa|condominio|apartamento|apto|residencial|urbanizaci[óo]n|barrio|metros|frente)\b"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Costa Rican provinces with their accent-free lowercase form.
pub const PROVINCES: &[(&str, &str)] = &[
    ("San José", "san jose"),
    ("Alajuela", "alajuela"),
    ("Cartago", "cartago"),
    ("Heredia", "heredia"),
    ("Guanacaste", "guanacaste"),
    ("Puntarenas", "puntarenas"),
    ("Limón", "limon"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_stops_at_next_label() {
        let caps = NAME_LABELED
            .captures("Nombre completo: Ana Perez Teléfono: 8888-1234")
            .unwrap();
        assert_eq!(&caps[1], "Ana Perez");
    }

    #[test]
    fn test_phone_labeled() {
        let caps = PHONE_LABELED.captures("Tel. 8888 1234 Provincia").unwrap();
        assert_eq!(&caps[1], "8888 1234");
    }

    #[test]
    fn test_location_labels() {
        let text = "Provincia: Heredia Cantón: Belén Distrito: La Ribera Email: a@b.com";
        assert_eq!(&PROVINCE_LABELED.captures(text).unwrap()[1], "Heredia");
        assert_eq!(&CANTON_LABELED.captures(text).unwrap()[1], "Belén");
        assert_eq!(&DISTRICT_LABELED.captures(text).unwrap()[1], "La Ribera");
    }

    #[test]
    fn test_address_keeps_commas() {
        let text = "Dirección exacta: 200 m norte de la iglesia, casa azul Horario: 8am";
        let caps = ADDRESS_LABELED.captures(text).unwrap();
        assert_eq!(&caps[1], "200 m norte de la iglesia, casa azul");
    }

    #[test]
    fn test_phone_line() {
        assert!(PHONE_LINE.is_match("8888-1234"));
        assert!(PHONE_LINE.is_match("+506 8888 1234"));
        assert!(!PHONE_LINE.is_match("Casa 12"));
    }
}
