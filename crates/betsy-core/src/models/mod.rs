//! Data models for Betsy CRM.

pub mod config;
pub mod customer;
pub mod product;
pub mod sale;
pub mod submission;
