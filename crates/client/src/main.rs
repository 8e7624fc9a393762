//! T800 combat agent demo binary.
//!
//! This binary is the composition root that assembles:
//! 1. Configuration from the environment (and an optional `.env`)
//! 2. Logging to stderr and, optionally, a log file
//! 3. The processor with the selected decision oracle
//!
//! It then reports a hostile unit, monitors the engagement, and shuts down on
//! Ctrl-C, after the configured run time, or once no threat remains active.

mod config;
mod logging;

use std::time::Duration;

use anyhow::Result;
use tracing::info;

use agent_core::{Location, Threat};
use runtime::{HeuristicOracle, OllamaOracle, OracleConfig, Processor, ProcessorConfig};

use config::{ClientConfig, OracleKind};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(config.log_dir.as_deref())?;

    info!("Initializing T800 systems");
    info!(oracle = %config.oracle, run_secs = config.run_duration.as_secs(), "Configuration loaded");

    let processor = build_processor(config.oracle)?;
    processor.start()?;
    info!("T800 systems online");

    let threat = Threat::new(
        "THREAT-001",
        "hostile_robot",
        Location::new(100.0, 100.0, 0.0),
        8,
    )
    .with_description("Hostile combat unit closing in");
    processor.report_threat(threat)?;

    let reason = tokio::select! {
        _ = tokio::signal::ctrl_c() => "interrupted",
        _ = tokio::time::sleep(config.run_duration) => "run time elapsed",
        _ = monitor(&processor, config.monitor_interval) => "no active threat",
    };

    info!(reason, "Shutting down T800 systems");
    processor.stop().await?;

    report_summary(&processor);
    Ok(())
}

fn build_processor(kind: OracleKind) -> Result<Processor> {
    let processor_config = ProcessorConfig::default();
    let builder = Processor::builder().config(processor_config.clone());

    let processor = match kind {
        OracleKind::Ollama => {
            let oracle_config = OracleConfig::from_env();
            info!(url = %oracle_config.base_url, model = %oracle_config.model, "Using Ollama decision oracle");
            builder.oracle(OllamaOracle::new(oracle_config)?).build()?
        }
        OracleKind::Heuristic => {
            info!("Using heuristic decision oracle");
            builder
                .oracle(HeuristicOracle::new(processor_config.engagement_distance))
                .build()?
        }
    };

    Ok(processor)
}

/// Reports the active threat every `period`; returns once none is active.
async fn monitor(processor: &Processor, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;

        let Some(threat) = processor.active_threat() else {
            return;
        };
        let location = processor.location();
        info!(
            threat = %threat.id,
            health = threat.health,
            distance = location.distance(threat.location),
            mode = %processor.status().mode,
            "Engagement status"
        );
    }
}

fn report_summary(processor: &Processor) {
    let metrics = processor.metrics();
    info!(
        scans = metrics.scans,
        contacts = metrics.contacts,
        decisions = metrics.decisions,
        oracle_failures = metrics.oracle_failures,
        hits = metrics.hits,
        "Engagement summary"
    );

    for (part, percent) in processor.anatomy().health_status() {
        info!(part = %part, percent, "Final part health");
    }
}
