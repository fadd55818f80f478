use std::path::PathBuf;

use anyhow::Context;

use mdm_generator::mdm::SkipReason;
use mdm_generator::registry::SchemaRegistry;
use mdm_generator::shared::{config, logger, output};

fn main() -> anyhow::Result<()> {
    // Optional first argument: path to config.toml
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    let config = config::load_config(config_path.as_deref())?;
    logger::init(&config.logging).context("Failed to initialise logging")?;
    config.log_origin();

    let registry_path = config.registry_path();
    let mut registry = SchemaRegistry::load(&registry_path)?;
    if let Some(order) = &config.registry.order {
        registry = registry.with_order(order.iter().cloned())?;
    }

    let build = registry.build(config.reconcile.input_only_match);

    for skipped in build.report.skipped_for(SkipReason::MissingInput) {
        tracing::info!("Skipped {}: no input declaration", skipped.entity);
    }

    let output_path = config.output_path();
    output::write_document(&build.document, &output_path, config.output.pretty)?;

    tracing::info!(
        "Done: {} entities, {} skipped, {} index collisions",
        build.document.indexes.len(),
        build.report.skipped.len(),
        build.report.collisions.len()
    );

    Ok(())
}
