//! Parse command - extract customer fields from pasted text.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use betsy_core::{CustomerInfo, CustomerParser, CustomerTextParser};

use super::{read_input, GlobalOptions, OutputFormat};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Text file to parse (default: stdin)
    input: Option<PathBuf>,

    /// JSON file with the current customer form, kept for unparsed fields
    #[arg(short, long)]
    previous: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show per-field confidence scores
    #[arg(long)]
    show_confidence: bool,
}

pub async fn run(args: ParseArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let text = read_input(args.input.as_deref())?;

    let previous = match &args.previous {
        Some(path) => serde_json::from_str::<CustomerInfo>(&read_input(Some(path.as_path()))?)?,
        None => CustomerInfo::new(config.sales.default_order_type),
    };

    let parser = CustomerTextParser::from_config(&config.parser);
    let result = parser.parse(&text, &previous);
    info!("Parse mode: {:?}", result.mode);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result.customer)?),
        OutputFormat::Text => {
            let c = &result.customer;
            let rows = [
                ("Name", &c.name),
                ("Phone", &c.phone),
                ("Email", &c.email),
                ("Province", &c.province),
                ("Canton", &c.canton),
                ("District", &c.district),
                ("Address", &c.address),
            ];
            for (label, value) in rows {
                println!("{:<9} {}", format!("{}:", label), value);
            }
        }
    }

    if !result.missing_fields.is_empty() {
        let missing: Vec<&str> = result.missing_fields.iter().map(|f| f.as_str()).collect();
        eprintln!(
            "{} Not found: {}",
            style("ℹ").blue(),
            missing.join(", ")
        );
    }

    if args.show_confidence {
        eprintln!("{} Mode: {:?}", style("ℹ").blue(), result.mode);
        for (field, confidence) in &result.field_confidence {
            eprintln!("  {:<9} {:.0}%", field.as_str(), confidence * 100.0);
        }
    }

    Ok(())
}
