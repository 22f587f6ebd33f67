//! Order commands - list, watch and update orders on the endpoint.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use serde_json::{Map, Value};
use tracing::info;

use betsy_core::models::sale::is_known_status;
use betsy_core::{SalesFilter, SalesSummary};
use betsy_remote::{PollEvent, SalesBackend, SalesPoller};

use super::{load_sales, sale_line, spinner, GlobalOptions, OrderTypeArg, OutputFormat};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Read a saved list body instead of fetching
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// First sale date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last sale date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Seller name (substring)
    #[arg(long)]
    seller: Option<String>,

    /// Order type
    #[arg(short = 't', long = "type", value_enum)]
    order_type: Option<OrderTypeArg>,

    /// Business name (substring)
    #[arg(long)]
    business: Option<String>,

    /// Workflow status
    #[arg(long)]
    status: Option<String>,

    /// Search customer name, order id, phone and product
    #[arg(short, long)]
    search: Option<String>,

    /// Show at most this many orders
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ListArgs {
    fn filter(&self) -> SalesFilter {
        SalesFilter {
            start_date: self.from,
            end_date: self.to,
            seller: self.seller.clone(),
            order_type: self.order_type.map(Into::into),
            business: self.business.clone(),
            status: self.status.clone(),
            search: self.search.clone(),
        }
    }
}

pub async fn list(args: ListArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let sales = load_sales(args.input.as_deref(), options, &config).await?;

    let mut matching = args.filter().apply(&sales);
    if let Some(limit) = args.limit {
        matching.truncate(limit);
    }
    info!("{} of {} orders match", matching.len(), sales.len());

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&matching)?),
        OutputFormat::Text => {
            for sale in &matching {
                println!("{}", sale_line(sale));
            }
            println!();
            println!(
                "{} {} of {} orders",
                style("ℹ").blue(),
                matching.len(),
                sales.len()
            );
        }
    }

    Ok(())
}

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Seconds between refreshes (default from config)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Stop after this many refreshes
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

pub async fn watch(args: WatchArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let mut config = options.load_config()?;
    if let Some(interval) = args.interval {
        config.remote.poll_interval_secs = interval;
    }

    let backend = options.backend(&config)?;
    let interval = backend.config().poll_interval;
    let (poller, mut rx) = SalesPoller::spawn(Arc::new(backend), interval);

    println!(
        "{} Refreshing every {}s, press Ctrl+C to stop",
        style("ℹ").blue(),
        interval.as_secs()
    );

    let mut seen = 0;
    while let Some(event) = rx.recv().await {
        match event {
            PollEvent::Snapshot(sales) => {
                let summary = SalesSummary::from_sales(&sales);
                println!(
                    "[{}] {} orders ({} EA, {} RA), {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    summary.total_sales,
                    summary.shipping_sales,
                    summary.pickup_sales,
                    betsy_core::format_colones(summary.total_amount)
                );
            }
            PollEvent::Error(message) => {
                eprintln!("{} {}", style("✗").red(), message);
            }
        }

        seen += 1;
        if args.count.is_some_and(|count| seen >= count) {
            break;
        }
    }

    drop(rx);
    poller.abort();
    poller.join().await;
    Ok(())
}

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Order id
    order_id: String,

    /// New workflow status (e.g. "Impreso")
    status: String,
}

pub async fn status(args: StatusArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let backend = options.backend(&config)?;

    if !is_known_status(&args.status) {
        eprintln!(
            "{} {:?} is not one of the usual statuses",
            style("⚠").yellow(),
            args.status
        );
    }

    let pb = spinner("Updating status...");
    let result = backend.update_status(&args.order_id, &args.status).await;
    pb.finish_and_clear();
    result?;

    println!(
        "{} {} set to {}",
        style("✓").green(),
        args.order_id,
        args.status
    );
    Ok(())
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Order id
    order_id: String,

    /// Field to change, as key=value (repeatable). Values are read as JSON
    /// when possible, otherwise as text.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", required = true)]
    fields: Vec<String>,
}

/// Parse `key=value` pairs into an update map.
pub fn parse_fields(pairs: &[String]) -> anyhow::Result<Map<String, Value>> {
    let mut fields = Map::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            anyhow::bail!("Expected KEY=VALUE, got {:?}", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("Empty field name in {:?}", pair);
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}

pub async fn update(args: UpdateArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let fields = parse_fields(&args.fields)?;
    let config = options.load_config()?;
    let backend = options.backend(&config)?;

    let count = fields.len();
    let pb = spinner("Updating order...");
    let result = backend.update_order(&args.order_id, fields).await;
    pb.finish_and_clear();
    result?;

    println!(
        "{} {} updated ({} fields)",
        style("✓").green(),
        args.order_id,
        count
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields() {
        let fields = parse_fields(&[
            "comments=listo para enviar".to_string(),
            "quantity=3".to_string(),
            "color=\"Negro\"".to_string(),
        ])
        .unwrap();

        assert_eq!(fields["comments"], "listo para enviar");
        assert_eq!(fields["quantity"], 3);
        assert_eq!(fields["color"], "Negro");

        assert!(parse_fields(&["sin-igual".to_string()]).is_err());
        assert!(parse_fields(&["=x".to_string()]).is_err());
    }
}
