//! Submit command - register a new sale.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Deserialize;
use tracing::debug;

use betsy_core::{format_colones, CustomerInfo, ProductInfo, SaleSubmission};
use betsy_remote::SalesBackend;

use super::{read_input, spinner, GlobalOptions};

/// Arguments for the submit command.
#[derive(Args)]
pub struct SubmitArgs {
    /// JSON file with `customerInfo` and `productInfo` (default: stdin)
    input: Option<PathBuf>,

    /// Apply 13% IVA
    #[arg(long, conflicts_with = "no_iva")]
    iva: bool,

    /// Do not apply IVA even if the config enables it by default
    #[arg(long)]
    no_iva: bool,

    /// Validate and print the payload without sending it
    #[arg(long)]
    dry_run: bool,
}

/// Form data as saved by the sales form.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaleForm {
    customer_info: CustomerInfo,
    product_info: ProductInfo,
}

pub async fn run(args: SubmitArgs, options: &GlobalOptions) -> anyhow::Result<()> {
    let config = options.load_config()?;
    let form: SaleForm = serde_json::from_str(&read_input(args.input.as_deref())?)?;

    let apply_iva = if args.no_iva {
        false
    } else {
        args.iva || config.sales.apply_iva_by_default
    };
    let submission = SaleSubmission::new(form.customer_info, form.product_info, apply_iva);
    debug!("Submission timestamp: {}", submission.timestamp);

    let issues = submission.validate();
    if !issues.is_empty() {
        eprintln!("{}", style("Validation issues:").yellow());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        anyhow::bail!("Sale not submitted ({} issues)", issues.len());
    }

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    let backend = options.backend(&config)?;
    let pb = spinner("Submitting sale...");
    let result = backend.submit_sale(&submission).await;
    pb.finish_and_clear();
    let receipt = result?;

    println!(
        "{} Sale registered as {} ({} {})",
        style("✓").green(),
        style(&receipt.order_id).bold(),
        submission.order_type(),
        format_colones(submission.product_info.total)
    );
    Ok(())
}
