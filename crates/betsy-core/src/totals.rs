//! Order totals with Costa Rican IVA.

use serde::{Deserialize, Serialize};

/// IVA rate applied when tax is enabled.
pub const IVA_RATE: f64 = 0.13;

/// Derived money fields of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub tax: f64,
    pub total: f64,
}

/// Compute tax and grand total.
///
/// Shipping is only charged on shipping orders and is never taxed. No
/// rounding is applied; format for display with [`format_colones`].
pub fn compute_total(
    cost: f64,
    quantity: u32,
    shipping_cost: f64,
    apply_tax: bool,
    is_shipping_order: bool,
) -> Totals {
    let subtotal = cost * f64::from(quantity);
    let shipping = if is_shipping_order { shipping_cost } else { 0.0 };
    let tax = if apply_tax { subtotal * IVA_RATE } else { 0.0 };

    Totals {
        tax,
        total: subtotal + shipping + tax,
    }
}

/// Format an amount in colones (₡1 234,56).
pub fn format_colones(amount: f64) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    // Add thousand separators
    let chars: Vec<char> = integer_part.chars().collect();
    let mut formatted = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(*c);
    }

    let sign = if amount < 0.0 && s != "0.00" { "-" } else { "" };
    format!("{}₡{},{}", sign, formatted, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_order_with_tax() {
        let totals = compute_total(100.0, 2, 50.0, true, true);
        assert_eq!(totals.tax, 26.0);
        assert_eq!(totals.total, 276.0);
    }

    #[test]
    fn test_pickup_order_ignores_shipping() {
        let totals = compute_total(100.0, 2, 50.0, false, false);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 200.0);
    }

    #[test]
    fn test_zero_quantity() {
        let totals = compute_total(100.0, 0, 50.0, true, true);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 50.0);
    }

    #[test]
    fn test_tax_disabled() {
        let totals = compute_total(12_500.0, 4, 3_000.0, false, true);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 53_000.0);
    }

    #[test]
    fn test_format_colones() {
        assert_eq!(format_colones(1234.56), "₡1 234,56");
        assert_eq!(format_colones(12345678.9), "₡12 345 678,90");
        assert_eq!(format_colones(0.0), "₡0,00");
        assert_eq!(format_colones(-500.0), "-₡500,00");
    }
}
