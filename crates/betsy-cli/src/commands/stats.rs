//! Stats command - summary and daily figures.

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::Serialize;

use betsy_core::{format_colones, DailyStats, SalesSummary};

use super::{load_sales, GlobalOptions, OutputFormat};

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    /// Read a saved list body instead of fetching
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Day to summarize (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    day: Option<NaiveDate>,

    /// UTC offset in hours (default from config)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct StatsReport {
    summary: SalesSummary,
    daily: DailyStats,
}

pub async fn run(args: StatsArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut config = options.load_config()?;
    if let Some(hours) = args.utc_offset {
        config.stats.utc_offset_hours = hours;
    }
    let offset = config.stats.offset();

    let sales = load_sales(args.input.as_deref(), options, &config).await?;
    let day = args
        .day
        .unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());

    let report = StatsReport {
        summary: SalesSummary::from_sales(&sales),
        daily: DailyStats::for_day(&sales, day, &offset),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            let s = &report.summary;
            let d = &report.daily;
            println!("All orders: {} ({} EA, {} RA)", s.total_sales, s.shipping_sales, s.pickup_sales);
            println!("All sales:  {}", format_colones(s.total_amount));
            println!();
            println!("Day {}:", d.date);
            println!("  Orders: {}", d.total_sales);
            println!("  Total:  {}", format_colones(d.total_amount));
            println!("  EA:     {} ({})", d.ea_sales, format_colones(d.ea_amount));
            println!("  RA:     {} ({})", d.ra_sales, format_colones(d.ra_amount));
        }
    }

    Ok(())
}
