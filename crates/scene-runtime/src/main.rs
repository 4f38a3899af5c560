//! # Scene Runtime
//!
//! Loads the declarative component documents of a scene, exports the live
//! scene back to documents and checks the round-trip.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging (`RUST_LOG`, default `info`)
//! 2. Load configuration (file, then `SK_*` environment)
//! 3. Wire registries and the scene
//! 4. Load `satellites/*.json` and `facilities/*.json`
//! 5. Export to the configured directory
//! 6. Re-export and compare against the inputs

use anyhow::{Context, Result};
use scene_runtime::{RuntimeConfig, SceneRuntime};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = RuntimeConfig::load().context("failed to load runtime configuration")?;

    info!("===========================================");
    info!("  Scene Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("  Input:  {}", config.input_dir.display());
    info!("  Export: {}", config.export.dir.display());
    info!("  On conflict: {}", config.factory.on_conflict);
    info!("===========================================");

    let mut runtime = SceneRuntime::new(config);
    let summary = runtime.run().context("scene round-trip failed")?;

    for (path, reason) in &summary.load.file_errors {
        warn!("Unreadable document {}: {}", path.display(), reason);
    }
    info!(
        "Exported {} files to {}",
        summary.manifest.exported_files.len(),
        summary.manifest.directory.display()
    );

    if let Some(report) = &summary.verification {
        if !report.is_clean() {
            error!(
                "Round-trip drift on {} components, {} missing",
                report.drifted.len(),
                report.missing.len()
            );
            anyhow::bail!("round-trip verification failed");
        }
        info!("Round-trip verified for {} components", report.checked);
    }
    Ok(())
}
