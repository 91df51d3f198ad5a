use anyhow::{Context, Result};
use launch_config::Config;

pub fn run(config: &Config, services: &[String]) -> Result<()> {
    let affected = launch_order::dependents_of(&config.service_set(), services)
        .context("Failed to resolve dependents")?;

    if affected.is_empty() {
        println!("No other services are affected");
        return Ok(());
    }

    println!("Stopping {} will affect:", services.join(", "));
    for service in &affected {
        println!("  - {}", service);
    }

    Ok(())
}
