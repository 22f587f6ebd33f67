//! Sales list decoding and encoding.

pub mod columns;
mod decoder;
mod encoder;
mod envelope;

pub use columns::{Column, COLUMN_COUNT};
pub use decoder::{coerce_number, coerce_quantity, decode_record, decode_sales_blob};
pub use encoder::{encode_record, encode_sales_blob};
pub use envelope::decode_list_response;
