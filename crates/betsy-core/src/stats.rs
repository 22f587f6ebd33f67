//! Sales statistics and list filters.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::customer::OrderType;
use crate::models::sale::Sale;

/// Totals over a list of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_sales: usize,
    pub shipping_sales: usize,
    pub pickup_sales: usize,
    pub total_amount: f64,
}

impl SalesSummary {
    pub fn from_sales(sales: &[Sale]) -> Self {
        sales.iter().fold(Self::default(), |mut acc, sale| {
            acc.total_sales += 1;
            acc.total_amount += sale.total;
            match sale.order_type() {
                OrderType::Shipping => acc.shipping_sales += 1,
                OrderType::Pickup => acc.pickup_sales += 1,
            }
            acc
        })
    }
}

/// Sales of a single calendar day, split by order type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_sales: usize,
    pub total_amount: f64,
    pub ea_sales: usize,
    pub ea_amount: f64,
    pub ra_sales: usize,
    pub ra_amount: f64,
}

/// Calendar day of a timestamp in the given offset.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as
/// already local).
pub fn local_day(timestamp: &str, offset: &FixedOffset) -> Option<NaiveDate> {
    let timestamp = timestamp.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(dt.with_timezone(offset).date_naive());
    }
    leading_date(timestamp)
}

/// Parse the `YYYY-MM-DD` prefix of a value.
fn leading_date(value: &str) -> Option<NaiveDate> {
    let prefix = value.get(..10)?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

impl DailyStats {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_sales: 0,
            total_amount: 0.0,
            ea_sales: 0,
            ea_amount: 0.0,
            ra_sales: 0,
            ra_amount: 0.0,
        }
    }

    /// Stats for the sales whose timestamp falls on `day` in `offset`.
    /// Sales with unreadable timestamps are skipped.
    pub fn for_day(sales: &[Sale], day: NaiveDate, offset: &FixedOffset) -> Self {
        sales
            .iter()
            .filter(|sale| local_day(&sale.timestamp, offset) == Some(day))
            .fold(Self::empty(day), |mut acc, sale| {
                acc.total_sales += 1;
                acc.total_amount += sale.total;
                match sale.order_type() {
                    OrderType::Shipping => {
                        acc.ea_sales += 1;
                        acc.ea_amount += sale.total;
                    }
                    OrderType::Pickup => {
                        acc.ra_sales += 1;
                        acc.ra_amount += sale.total;
                    }
                }
                acc
            })
    }
}

/// Criteria for narrowing a sales list. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesFilter {
    /// First sale date to include.
    pub start_date: Option<NaiveDate>,
    /// Last sale date to include.
    pub end_date: Option<NaiveDate>,
    /// Seller substring, case-insensitive.
    pub seller: Option<String>,
    pub order_type: Option<OrderType>,
    /// Business substring, case-insensitive.
    pub business: Option<String>,
    /// Exact status, case-insensitive.
    pub status: Option<String>,
    /// Matched against customer name, order id, phone and product.
    pub search: Option<String>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl SalesFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_seller(mut self, seller: impl Into<String>) -> Self {
        self.seller = Some(seller.into());
        self
    }

    pub fn with_order_type(mut self, order_type: OrderType) -> Self {
        self.order_type = Some(order_type);
        self
    }

    pub fn with_business(mut self, business: impl Into<String>) -> Self {
        self.business = Some(business.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn matches(&self, sale: &Sale) -> bool {
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = sale.sale_date().and_then(leading_date) else {
                return false;
            };
            if self.start_date.is_some_and(|start| date < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| date > end) {
                return false;
            }
        }

        if let Some(seller) = &self.seller {
            if !contains_ci(sale.seller(), seller) {
                return false;
            }
        }
        if let Some(order_type) = self.order_type {
            if sale.order_type() != order_type {
                return false;
            }
        }
        if let Some(business) = &self.business {
            if !contains_ci(&sale.business, business) {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if sale.status.to_lowercase() != status.trim().to_lowercase() {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let hit = contains_ci(&sale.customer_name, term)
                || contains_ci(&sale.order_id, term)
                || contains_ci(&sale.phone, term)
                || contains_ci(&sale.product, term);
            if !hit {
                return false;
            }
        }

        true
    }

    /// Matching sales, in input order.
    pub fn apply<'a>(&self, sales: &'a [Sale]) -> Vec<&'a Sale> {
        sales.iter().filter(|sale| self.matches(sale)).collect()
    }
}
