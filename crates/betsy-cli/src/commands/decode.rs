//! Decode command - read a saved sales list body.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use betsy_core::models::sale::is_known_status;
use betsy_core::{decode_list_response, encode_sales_blob};

use super::{read_input, sale_line};

/// Arguments for the decode command.
#[derive(Args)]
pub struct DecodeArgs {
    /// File with the list body, JSON envelope or delimited text (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: DecodeFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum DecodeFormat {
    /// JSON array of orders
    Json,
    /// One line per order
    Text,
    /// Canonical delimited list
    Blob,
}

pub async fn run(args: DecodeArgs) -> anyhow::Result<()> {
    let body = read_input(args.input.as_deref())?;
    let sales = decode_list_response(&body)?;

    for sale in &sales {
        if !is_known_status(&sale.status) {
            eprintln!(
                "{} Order {} has unknown status {:?}",
                style("⚠").yellow(),
                sale.order_id,
                sale.status
            );
        }
    }

    let output = match args.format {
        DecodeFormat::Json => serde_json::to_string_pretty(&sales)?,
        DecodeFormat::Text => sales.iter().map(sale_line).collect::<Vec<_>>().join("\n"),
        DecodeFormat::Blob => encode_sales_blob(&sales),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} orders written to {}",
            style("✓").green(),
            sales.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}
