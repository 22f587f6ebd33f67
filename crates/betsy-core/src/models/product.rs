//! Product section of a sale.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::customer::OrderType;
use crate::totals::compute_total;

/// Packaging options offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Packaging {
    Normal,
    #[serde(rename = "Kit madera")]
    WoodenKit,
    #[serde(rename = "Kit Regalo")]
    GiftKit,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Packaging {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::WoodenKit => "Kit madera",
            Self::GiftKit => "Kit Regalo",
            Self::Unset => "",
        }
    }
}

impl FromStr for Packaging {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "kit madera" => Ok(Self::WoodenKit),
            "kit regalo" => Ok(Self::GiftKit),
            "" => Ok(Self::Unset),
            other => Err(format!("unknown packaging: {}", other)),
        }
    }
}

/// Sales staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Seller {
    Rafa,
    Marlenn,
    JuanC,
    Web,
    Nose,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Seller {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rafa => "Rafa",
            Self::Marlenn => "Marlenn",
            Self::JuanC => "JuanC",
            Self::Web => "Web",
            Self::Nose => "Nose",
            Self::Unset => "",
        }
    }
}

impl FromStr for Seller {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rafa" => Ok(Self::Rafa),
            "marlenn" => Ok(Self::Marlenn),
            "juanc" => Ok(Self::JuanC),
            "web" => Ok(Self::Web),
            "nose" => Ok(Self::Nose),
            "" => Ok(Self::Unset),
            other => Err(format!("unknown seller: {}", other)),
        }
    }
}

/// Delivery services used for shipping orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Courier {
    Uber,
    Correos,
    Privada,
    Didi,
    InDriver,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl Courier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uber => "Uber",
            Self::Correos => "Correos",
            Self::Privada => "Privada",
            Self::Didi => "Didi",
            Self::InDriver => "InDriver",
            Self::Unset => "",
        }
    }
}

impl FromStr for Courier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uber" => Ok(Self::Uber),
            "correos" => Ok(Self::Correos),
            "privada" => Ok(Self::Privada),
            "didi" => Ok(Self::Didi),
            "indriver" => Ok(Self::InDriver),
            "" => Ok(Self::Unset),
            other => Err(format!("unknown courier: {}", other)),
        }
    }
}

/// Product details entered by the operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductInfo {
    /// Free-text product description.
    #[serde(rename = "type")]
    pub product: String,

    pub color: String,

    #[serde(rename = "tamano")]
    pub size: String,

    pub packaging: Packaging,

    /// Customization text (engraving, names, ...).
    #[serde(rename = "personalizado")]
    pub customization: String,

    pub comments: String,

    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Unit cost of the product.
    pub product_cost: f64,

    /// Shipping cost, only charged on shipping orders.
    pub shipping_cost: f64,

    /// Computed IVA amount.
    pub iva: f64,

    /// Computed grand total.
    pub total: f64,

    #[serde(rename = "vendedor")]
    pub seller: Seller,

    /// Courier, shipping orders only.
    #[serde(rename = "mensajeria")]
    pub courier: Courier,
}

impl ProductInfo {
    /// Recompute `iva` and `total` from the cost inputs.
    pub fn recalculate(&mut self, apply_iva: bool, order_type: OrderType) {
        let totals = compute_total(
            self.product_cost,
            self.quantity,
            self.shipping_cost,
            apply_iva,
            order_type.is_shipping(),
        );
        self.iva = totals.tax;
        self.total = totals.total;
    }
}
