//! PassGen - Random password generator
//!
//! Main entry point for the GUI application.
//!
//! # Overview
//!
//! This binary crate provides the Slint GUI frontend for PassGen. It initializes:
//! - Configuration loading ([`ConfigManager`])
//! - Logging infrastructure (file rotation + optional console output)
//! - A small tokio runtime that runs the copy-feedback timer
//! - State management ([`StateManager`]) seeded with the saved options
//! - The copy action ([`CopyController`]) on the system clipboard
//! - GUI controller ([`GuiController`])
//!
//! # Execution Flow
//!
//! 1. Load `PassGen Data/passgen.yaml` (+ `PASSGEN_*` environment overrides)
//! 2. Initialize logging → logs/passgen.<date>
//! 3. Create tokio runtime
//! 4. Create StateManager, which generates the initial password
//! 5. Create GuiController and run the Slint event loop (blocks until window closed)
//! 6. Save the current options as the next launch's defaults
//! 7. Log the metrics summary and shut the runtime down

use anyhow::Result;
use passgen::models::GeneratorDefaults;
use passgen::services::SystemClipboard;
use passgen::ui::GuiController;
use passgen::{APP_NAME, ConfigManager, CopyController, StateManager, VERSION, metrics};
use std::sync::Arc;
use std::time::Duration;

/// Directory holding `passgen.yaml`, relative to the working directory
const CONFIG_DIR: &str = "PassGen Data";

fn main() -> Result<()> {
    let config_manager = ConfigManager::new(CONFIG_DIR)?;
    let settings = config_manager.load_settings()?;

    // Held until the end of main so buffered log lines are flushed
    let _log_guard = passgen::logging::setup_logging_with_console(
        "logs",
        "passgen",
        settings.debug_mode,
        settings.console_logging,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!("Settings loaded from {}", config_manager.settings_path());

    // One worker is plenty: the only async work is the copy feedback timer
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .thread_name("passgen-worker")
        .build()?;

    let state_manager = Arc::new(StateManager::with_options(settings.generator.to_options()));
    tracing::info!("State manager initialized");

    let copy_controller = Arc::new(
        CopyController::new(
            Arc::clone(&state_manager),
            Box::new(SystemClipboard),
            runtime.handle().clone(),
        )
        .with_feedback_duration(settings.copy_feedback()),
    );

    let gui_controller = GuiController::new(Arc::clone(&state_manager), copy_controller)?;

    tracing::info!("GUI controller initialized, launching window");

    let result = gui_controller.run();

    tracing::info!("GUI closed, shutting down");

    // Remember the options (never the password) for the next launch.
    // PASSGEN_* overrides in `settings` stay out of the file.
    let generator = GeneratorDefaults::from_options(&state_manager.options());
    if let Err(e) = config_manager.save_generator_defaults(generator) {
        tracing::error!("Failed to save settings: {:#}", e);
    }

    metrics::global().log_summary();

    runtime.shutdown_timeout(Duration::from_secs(1));

    tracing::info!("Application shutdown complete");

    result.map_err(|e| {
        tracing::error!("GUI error: {}", e);
        anyhow::anyhow!("GUI error: {}", e)
    })
}
