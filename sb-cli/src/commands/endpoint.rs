//! Endpoint, health and config commands.

use std::path::Path;

use clap::Subcommand;
use console::style;

use sb_core::config::AppConfig;
use sb_core::endpoint::EndpointResolver;
use sb_core::error::{SbError, SbResult};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write the effective configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn show(config: &AppConfig, format: OutputFormat) -> SbResult<()> {
    let endpoint = EndpointResolver::from_config(&config.api);

    match format {
        OutputFormat::Json => {
            super::print_json(&serde_json::json!({
                "baseUrl": endpoint.base_url,
                "timeoutMs": endpoint.timeout.as_millis() as u64,
                "buildMode": config.api.build_mode.to_string(),
                "platform": config.api.platform.to_string(),
                "deviceIp": config.api.device_ip,
            }));
        }
        OutputFormat::Text => {
            println!("Base URL:    {}", style(&endpoint.base_url).bold());
            println!("Timeout:     {} ms", endpoint.timeout.as_millis());
            println!("Build mode:  {}", config.api.build_mode);
            println!("Platform:    {}", config.api.platform);
            println!(
                "Device IP:   {}",
                super::cell(config.api.device_ip.as_deref())
            );
        }
    }
    Ok(())
}

pub async fn health(config: AppConfig, format: OutputFormat) -> SbResult<()> {
    let ctx = super::AppContext::init(config)?;
    let url = ctx.api().base_url().to_string();

    let pb = super::spinner("Checking backend...");
    let healthy = ctx.api().health_check().await;
    pb.finish_and_clear();

    match format {
        OutputFormat::Json => {
            super::print_json(&serde_json::json!({ "baseUrl": url, "healthy": healthy }));
        }
        OutputFormat::Text => {
            if healthy {
                println!("  {} {} is reachable.", style("OK").green().bold(), url);
            } else {
                println!("  {} {} is not reachable.", style("DOWN").red().bold(), url);
            }
        }
    }
    Ok(())
}

pub fn config(
    config: &AppConfig,
    path: &Path,
    action: ConfigAction,
    format: OutputFormat,
) -> SbResult<()> {
    match action {
        ConfigAction::Show => match format {
            OutputFormat::Json => super::print_json(config),
            OutputFormat::Text => {
                println!("# {}", path.display());
                let text = toml::to_string_pretty(config)
                    .map_err(|e| SbError::Serialization(e.to_string()))?;
                println!("{text}");
            }
        },
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                println!(
                    "  {} {} already exists. Use --force to overwrite.",
                    style("SKIP").yellow().bold(),
                    path.display()
                );
                return Ok(());
            }
            config.save_to_file(path)?;
            println!("  {} Wrote {}", style("OK").green().bold(), path.display());
        }
    }
    Ok(())
}

