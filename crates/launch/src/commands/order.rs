use crate::OutputFormat;
use anyhow::{Context, Result};
use launch_config::Config;

pub fn run(
    config: &Config,
    services: &[String],
    format: OutputFormat,
    layers: bool,
) -> Result<()> {
    // Get services in dependency order (dependencies first)
    let order = config
        .resolver()
        .resolve_for(&config.service_set(), services)
        .context("Failed to resolve start order")?;

    match (format, layers) {
        (OutputFormat::Text, false) => {
            for name in order.names() {
                println!("{}", name);
            }
        }
        (OutputFormat::Text, true) => {
            for (index, layer) in order.layers().iter().enumerate() {
                println!("layer {}: {}", index, layer.join(", "));
            }
        }
        (OutputFormat::Json, false) => {
            let names: Vec<&str> = order.names().collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
        (OutputFormat::Json, true) => {
            println!("{}", serde_json::to_string_pretty(&order.layers())?);
        }
    }

    Ok(())
}
