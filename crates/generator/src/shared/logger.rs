//! Tracing subscriber setup: stdout plus a plain-text log file

use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::config::LoggingConfig;

/// Install the global subscriber. RUST_LOG overrides the configured filter.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    let log_file_path = Path::new(&config.file);
    if let Some(log_dir) = log_file_path.parent() {
        std::fs::create_dir_all(log_dir)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter_directive(
            std::env::var("RUST_LOG").ok(),
            &config.filter,
        )))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

fn filter_directive(env: Option<String>, configured: &str) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => configured.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_takes_precedence() {
        assert_eq!(filter_directive(Some("debug".into()), "info"), "debug");
        assert_eq!(filter_directive(Some("  ".into()), "info"), "info");
        assert_eq!(filter_directive(None, "warn,mdm_generator=debug"), "warn,mdm_generator=debug");
    }
}
