mod catalog;
mod config;
mod engine;
mod evaluator;
mod telemetry;

pub use catalog::{ActionCatalog, ActionInfo, CatalogError, JobInfo};
pub use config::{load_or_default, save, AntsConfig};
pub use engine::{HighlightEngine, SlotKind};
pub use evaluator::{
    available_charges, should_highlight, EvalContext, HighlightOptions, CHARGE_ALIAS_GROUP,
};
pub use telemetry::{GroupTimer, PlayerSnapshot, RecastSource, RecastTelemetry};

use std::path::Path;

/// Set up file logging for the embedded plugin — write to a daily-rolling
/// file in the host-supplied log directory. Files rotate daily.
///
/// Called once by the host at plugin load, before anything else; a second
/// call is a no-op. Init happens before the engine is built so any setup
/// failure is captured in the log file.
pub fn init_logging(log_dir: &Path) {
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, "ants.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the guard alive for the process lifetime — drop = flush.
    // We leak it intentionally; it lives as long as the host does.
    std::mem::forget(guard);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ability_ants=debug".parse().unwrap()),
        )
        .with_writer(non_blocking)
        .with_ansi(false) // log files should not contain ANSI colour codes
        .try_init()
        .is_ok();
    if !installed {
        // The host already owns a global subscriber; our events flow there.
        return;
    }

    // Log panics through tracing before the host's loader sees them.
    // Without this, panic messages only appear on stderr (invisible in prod).
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        let message = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        tracing::error!("PANIC at {}: {}", location, message);
    }));

    tracing::info!("Ability ants core starting — logs → {}", log_dir.display());
}
