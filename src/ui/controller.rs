// GUI Controller - Bridges the Slint UI with the password state
//
// This module contains the GuiController which coordinates between:
// - Slint UI (MainWindow)
// - StateManager (options, current password, copy state)
// - CopyController (clipboard + copy feedback timer)
// - EventLoopBridge (cross-thread UI updates)
//
// It handles:
// - Forwarding slider/checkbox/button callbacks to the state
// - Subscribing to state changes and pushing them back to the UI

use crate::models::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordLength, copy_label_for};
use crate::state::{CopyController, StateChange, StateManager};
use crate::ui::bridge::EventLoopBridge;
use anyhow::{Context, Result};
use std::sync::Arc;

// Include the generated Slint code
slint::include_modules!();

/// GUI Controller that wires up the Slint UI with application state
///
/// # Example
/// ```ignore
/// let state_manager = Arc::new(StateManager::new());
/// let copy = Arc::new(CopyController::new(
///     Arc::clone(&state_manager),
///     Box::new(SystemClipboard),
///     runtime.handle().clone(),
/// ));
///
/// let controller = GuiController::new(state_manager, copy)?;
/// controller.run()?;  // Blocks until window is closed
/// ```
pub struct GuiController {
    /// The Slint UI window
    ui: MainWindow,

    /// Keeps the update handler thread's channel open
    _bridge: EventLoopBridge<MainWindow>,

    _state_manager: Arc<StateManager>,
}

impl GuiController {
    /// Create the window, push the initial state and connect everything up
    pub fn new(
        state_manager: Arc<StateManager>,
        copy_controller: Arc<CopyController>,
    ) -> Result<Self> {
        let ui = MainWindow::new().context("Failed to create Slint UI")?;

        let bridge = EventLoopBridge::new(&ui);

        Self::sync_ui_with_state(&ui, &state_manager);
        Self::setup_callbacks(&ui, &state_manager, &copy_controller);
        Self::setup_state_subscription(&bridge, &state_manager);

        tracing::info!("GUI controller initialized");

        Ok(Self {
            ui,
            _bridge: bridge,
            _state_manager: state_manager,
        })
    }

    /// Run the GUI (blocks until window is closed)
    pub fn run(self) -> Result<(), slint::PlatformError> {
        tracing::info!("Starting GUI event loop");
        self.ui.run()
    }

    /// Push the full current state into the window.
    fn sync_ui_with_state(ui: &MainWindow, state_manager: &StateManager) {
        let state = state_manager.snapshot();

        ui.set_min_length(MIN_PASSWORD_LENGTH as i32);
        ui.set_max_length(MAX_PASSWORD_LENGTH as i32);

        ui.set_length(state.options.length.as_u32() as i32);
        ui.set_include_digits(state.options.include_digits);
        ui.set_include_special(state.options.include_special);

        ui.set_password(state.password.as_str().into());
        ui.set_copied(state.copied);
        ui.set_copy_label(state.copy_label().into());

        tracing::debug!("UI synchronized with initial state");
    }

    /// Connect Slint callbacks to state mutations.
    fn setup_callbacks(
        ui: &MainWindow,
        state_manager: &Arc<StateManager>,
        copy_controller: &Arc<CopyController>,
    ) {
        let state = Arc::clone(state_manager);

        ui.on_length_changed(move |value| {
            let length = length_from_slider(value);
            tracing::trace!("Length slider moved: {}", length);
            state.set_length(length);
        });

        let state = Arc::clone(state_manager);

        ui.on_digits_toggled(move |checked| {
            tracing::debug!("Numbers toggled: {}", checked);
            state.set_include_digits(checked);
        });

        let state = Arc::clone(state_manager);

        ui.on_special_toggled(move |checked| {
            tracing::debug!("Characters toggled: {}", checked);
            state.set_include_special(checked);
        });

        let copy = Arc::clone(copy_controller);

        ui.on_copy_password(move || {
            tracing::debug!("Copy button clicked");
            // The button stays on "Copy" when the clipboard write fails
            if let Err(e) = copy.copy_current() {
                tracing::debug!("Copy action failed: {}", e);
            }
        });

        tracing::debug!("UI callbacks configured");
    }

    /// Subscribe to state changes and update UI accordingly
    ///
    /// This spawns a background thread that listens for state change events
    /// and updates the Slint UI via the EventLoopBridge.
    fn setup_state_subscription(
        bridge: &EventLoopBridge<MainWindow>,
        state_manager: &Arc<StateManager>,
    ) {
        let bridge_handle = bridge.clone_handle();
        let state_manager_clone = Arc::clone(state_manager);
        let mut rx = state_manager.subscribe();

        std::thread::spawn(move || {
            tracing::debug!("State subscription thread started");

            loop {
                match rx.blocking_recv() {
                    Ok(change) => {
                        tracing::trace!("State change received: {:?}", change);

                        match change {
                            StateChange::OptionsChanged { options } => {
                                bridge_handle.update_ui(move |ui| {
                                    ui.set_length(options.length.as_u32() as i32);
                                    ui.set_include_digits(options.include_digits);
                                    ui.set_include_special(options.include_special);
                                });
                            }

                            StateChange::PasswordGenerated { length, generation } => {
                                tracing::debug!(
                                    "Password #{} generated ({} characters)",
                                    generation,
                                    length
                                );
                                let password = state_manager_clone.read(|s| s.password.clone());
                                bridge_handle.update_ui(move |ui| {
                                    ui.set_password(password.into());
                                });
                            }

                            StateChange::CopyStateChanged { copied } => {
                                bridge_handle.update_ui(move |ui| {
                                    ui.set_copied(copied);
                                    ui.set_copy_label(copy_label_for(copied).into());
                                });
                            }
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        tracing::info!(
                            "State broadcast channel closed - shutting down subscription thread"
                        );
                        break;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "State subscription lagged - {} events were skipped, resyncing",
                            skipped
                        );
                        // Skipped events may include the latest password; push a full snapshot
                        let state = state_manager_clone.snapshot();
                        bridge_handle.update_ui(move |ui| {
                            ui.set_length(state.options.length.as_u32() as i32);
                            ui.set_include_digits(state.options.include_digits);
                            ui.set_include_special(state.options.include_special);
                            ui.set_password(state.password.as_str().into());
                            ui.set_copied(state.copied);
                            ui.set_copy_label(state.copy_label().into());
                        });
                    }
                }
            }

            tracing::debug!("State subscription thread terminated gracefully");
        });
    }
}

/// Convert a slider position into a password length.
///
/// The slider is bounded to the valid range already; clamping only guards
/// against rounding at the ends.
fn length_from_slider(value: i32) -> PasswordLength {
    PasswordLength::saturating(i64::from(value))
}
