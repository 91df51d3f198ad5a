use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use launch_config::Config;
use launch_order::DependencyGraph;
use std::path::Path;

pub fn run(config_path: &Path, config: &Config) -> Result<()> {
    println!("Validating {}...", config_path.display());

    let services = config.service_set();
    let graph = DependencyGraph::build(&services).context("Invalid service link")?;
    let order = config
        .resolver()
        .resolve(&services)
        .context("Failed to resolve start order")?;

    println!("✓ Configuration valid");
    println!("  Version: {}", config.version);

    if let Some(name) = &config.name {
        println!("  Name: {}", name);
    }

    println!("  Services: {}", order.len());
    println!("  Layers: {}", order.layers().len());

    for preferred in &config.settings.prefer {
        if !services.contains_key(preferred) {
            println!("  ⚠ Preferred service '{}' is not defined", preferred);
        }
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "SERVICE", "LAYER", "DEPENDS ON"]);

    for (index, scheduled) in order.iter().enumerate() {
        let deps_display = graph
            .dependencies(&scheduled.name)
            .map(|deps| deps.iter().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        let layer_color = if scheduled.weight == 0 {
            Color::Green
        } else {
            Color::Reset
        };

        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&scheduled.name),
            Cell::new(scheduled.weight).fg(layer_color),
            Cell::new(deps_display),
        ]);
    }

    println!("{table}");

    Ok(())
}
