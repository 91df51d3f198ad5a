use crate::OutputFormat;
use anyhow::{Context, Result};
use launch_config::Config;

pub fn run(config: &Config, services: &[String], format: OutputFormat) -> Result<()> {
    // Get services in reverse dependency order (dependents first)
    let ordered_services = config
        .resolver()
        .stop_order_for(&config.service_set(), services)
        .context("Failed to resolve stop order")?;

    match format {
        OutputFormat::Text => {
            for name in &ordered_services {
                println!("{}", name);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ordered_services)?);
        }
    }

    Ok(())
}
