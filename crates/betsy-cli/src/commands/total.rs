//! Total command - compute IVA and grand total of an order.

use clap::Args;

use betsy_core::{compute_total, format_colones, OrderType};

use super::{GlobalOptions, OrderTypeArg, OutputFormat};

/// Arguments for the total command.
#[derive(Args)]
pub struct TotalArgs {
    /// Unit product cost
    #[arg(long)]
    cost: f64,

    /// Quantity
    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Shipping cost (shipping orders only)
    #[arg(short, long, default_value_t = 0.0)]
    shipping: f64,

    /// Apply 13% IVA
    #[arg(long, conflicts_with = "no_iva")]
    iva: bool,

    /// Do not apply IVA even if the config enables it by default
    #[arg(long)]
    no_iva: bool,

    /// Order type (default from config)
    #[arg(short = 't', long = "type", value_enum)]
    order_type: Option<OrderTypeArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

pub async fn run(args: TotalArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;

    if args.cost < 0.0 || args.shipping < 0.0 {
        anyhow::bail!("Costs cannot be negative");
    }

    let apply_iva = if args.no_iva {
        false
    } else {
        args.iva || config.sales.apply_iva_by_default
    };
    let order_type: OrderType = args
        .order_type
        .map(Into::into)
        .unwrap_or(config.sales.default_order_type);

    let totals = compute_total(
        args.cost,
        args.quantity,
        args.shipping,
        apply_iva,
        order_type.is_shipping(),
    );

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&totals)?),
        OutputFormat::Text => {
            println!("Order type: {}", order_type);
            println!("IVA:        {}", format_colones(totals.tax));
            println!("Total:      {}", format_colones(totals.total));
        }
    }

    Ok(())
}
