//! Customer data captured by the sales form.

use serde::{Deserialize, Serialize};

/// Order variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderType {
    /// Envío a domicilio (shipping order).
    #[default]
    #[serde(rename = "EA")]
    Shipping,
    /// Retiro en agencia (pickup order).
    #[serde(rename = "RA")]
    Pickup,
}

impl OrderType {
    /// Wire code used by the spreadsheet endpoint.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Shipping => "EA",
            Self::Pickup => "RA",
        }
    }

    /// Parse a wire code. Only `EA` and `RA` are recognized (case-insensitive).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "EA" => Some(Self::Shipping),
            "RA" => Some(Self::Pickup),
            _ => None,
        }
    }

    /// Order type of a stored record. Only the exact code `EA` is a
    /// shipping order; anything else, including `ea`, reads as pickup.
    pub fn from_wire(s: &str) -> Self {
        if s.trim() == Self::Shipping.code() {
            Self::Shipping
        } else {
            Self::Pickup
        }
    }

    pub fn is_shipping(&self) -> bool {
        matches!(self, Self::Shipping)
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Marketing channel an order came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Funnel {
    Instagram,
    Whatsapp,
    /// Not selected yet.
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Funnel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Whatsapp => "Whatsapp",
            Self::Unset => "",
        }
    }

    /// Parse a channel label, accepting the "WhatsApp" spelling.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Some(Self::Instagram),
            "whatsapp" => Some(Self::Whatsapp),
            "" => Some(Self::Unset),
            _ => None,
        }
    }
}

/// Customer section of a sale.
///
/// Field names on the wire follow the spreadsheet script, which still uses
/// the Spanish keys for the date fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomerInfo {
    /// Customer full name.
    pub name: String,

    /// Phone number, digits only after parsing.
    pub phone: String,

    pub province: String,
    pub canton: String,
    pub district: String,
    pub email: String,

    /// Instagram/Facebook handle.
    pub username: String,

    /// Delivery address (shipping orders).
    pub address: String,

    /// Brand the sale belongs to (Quark, WAS, KROMA).
    pub business: String,

    pub funnel: Funnel,

    /// Expected delivery date (shipping orders).
    #[serde(rename = "fechaEsperada")]
    pub expected_date: String,

    /// Agreed pickup date (pickup orders).
    #[serde(rename = "fechaAcordada")]
    pub agreed_date: String,

    /// Actual pickup date (pickup orders).
    #[serde(rename = "fechaRetirada")]
    pub pickup_date: String,

    /// Day the sale was made.
    #[serde(rename = "diaVenta")]
    pub sale_date: String,

    pub order_type: OrderType,
}

impl CustomerInfo {
    /// Create an empty customer for the given order type.
    pub fn new(order_type: OrderType) -> Self {
        Self {
            order_type,
            ..Self::default()
        }
    }
}
