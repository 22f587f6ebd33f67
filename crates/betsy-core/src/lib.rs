//! Core library for Betsy CRM order management.
//!
//! This crate provides:
//! - Free-text customer parsing (labeled patterns with positional fallback)
//! - Decoding of the spreadsheet endpoint's delimited sales list
//! - Order totals with Costa Rican IVA
//! - Sales statistics and filters
//! - Order, customer and product data models

pub mod error;
pub mod models;
pub mod customer;
pub mod sales;
pub mod totals;
pub mod stats;

pub use error::{BetsyError, DecodeError, Result};
pub use models::config::BetsyConfig;
pub use models::customer::{CustomerInfo, Funnel, OrderType};
pub use models::product::{Courier, Packaging, ProductInfo, Seller};
pub use models::sale::{PickupDetails, Sale, SaleDetails, ShippingDetails};
pub use models::submission::{SaleSubmission, SubmitReceipt};
pub use customer::{
    parse_customer_text, CustomerExtraction, CustomerField, CustomerParser, CustomerTextParser,
    ParseMode,
};
pub use sales::{decode_list_response, decode_sales_blob, encode_sales_blob};
pub use totals::{compute_total, format_colones, Totals, IVA_RATE};
pub use stats::{DailyStats, SalesFilter, SalesSummary};
