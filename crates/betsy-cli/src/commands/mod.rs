//! Subcommands and the helpers they share.

pub mod config;
pub mod decode;
pub mod orders;
pub mod parse;
pub mod stats;
pub mod submit;
pub mod total;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use betsy_core::{decode_list_response, BetsyConfig, OrderType, Sale};
use betsy_remote::{RemoteConfig, SalesBackend, ScriptBackend};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Output format shared by the read commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

/// Order type as typed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderTypeArg {
    /// Shipping order (envío a domicilio)
    Ea,
    /// Pickup order (retiro en agencia)
    Ra,
}

impl From<OrderTypeArg> for OrderType {
    fn from(arg: OrderTypeArg) -> Self {
        match arg {
            OrderTypeArg::Ea => OrderType::Shipping,
            OrderTypeArg::Ra => OrderType::Pickup,
        }
    }
}

/// Options every command that talks to the endpoint receives.
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub config_path: Option<PathBuf>,
    pub script_url: Option<String>,
}

impl GlobalOptions {
    /// Config file in use: the `--config` path or the default location.
    pub fn config_file(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(default_config_path)
    }

    /// Load the configuration. An explicit path must exist; the default
    /// location falls back to defaults when missing.
    pub fn load_config(&self) -> anyhow::Result<BetsyConfig> {
        let mut config = match &self.config_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                BetsyConfig::from_file(path)?
            }
            None => {
                let path = default_config_path();
                if path.exists() {
                    BetsyConfig::from_file(&path)?
                } else {
                    BetsyConfig::default()
                }
            }
        };

        if let Some(url) = &self.script_url {
            config.remote.script_url = url.clone();
        }
        Ok(config)
    }

    /// HTTP backend for the configured endpoint.
    pub fn backend(&self, config: &BetsyConfig) -> anyhow::Result<ScriptBackend> {
        if config.remote.script_url.trim().is_empty() {
            anyhow::bail!(
                "Script URL not configured.\n\n\
                 Pass --script-url or run 'betsy config set remote.script_url <url>'."
            );
        }
        let remote = RemoteConfig::from_settings(&config.remote)?;
        Ok(ScriptBackend::new(remote)?)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("betsy")
        .join("config.json")
}

/// Read a file, or stdin when the path is missing or `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            if !p.exists() {
                anyhow::bail!("Input file not found: {}", p.display());
            }
            Ok(fs::read_to_string(p)?)
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Sales from a saved list body, or fetched from the endpoint.
pub async fn load_sales(
    input: Option<&Path>,
    options: &GlobalOptions,
    config: &BetsyConfig,
) -> anyhow::Result<Vec<Sale>> {
    if let Some(path) = input {
        let body = read_input(Some(path))?;
        let sales = decode_list_response(&body)?;
        debug!("Read {} sales from {}", sales.len(), path.display());
        return Ok(sales);
    }

    let backend = options.backend(config)?;
    let pb = spinner("Fetching sales...");
    let result = backend.fetch_sales().await;
    pb.finish_and_clear();
    Ok(result?)
}

/// One-line description of a sale.
pub fn sale_line(sale: &Sale) -> String {
    format!(
        "{:<10} {:<2} {:<14} {:<24} {:<20} {:>14}",
        sale.order_id,
        sale.order_type().code(),
        sale.status,
        truncate(&sale.customer_name, 24),
        truncate(&sale.product, 20),
        betsy_core::format_colones(sale.total)
    )
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let cut: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Taza", 10), "Taza");
        assert_eq!(truncate("Camiseta estampada", 8), "Camiset…");
    }

    #[test]
    fn test_order_type_arg() {
        assert_eq!(OrderType::from(OrderTypeArg::Ea), OrderType::Shipping);
        assert_eq!(OrderType::from(OrderTypeArg::Ra), OrderType::Pickup);
    }
}
