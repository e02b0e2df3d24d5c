// State management module
//
// This module provides the StateManager which wraps AppState with thread-safe access
// using Arc<RwLock<T>> and emits change events for GUI updates. It also owns the
// recomputation rule: every configuration change produces a new password.

pub mod copy;

pub use copy::CopyController;

use crate::metrics;
use crate::models::{AppState, GeneratorOptions, PasswordLength};
use crate::services::generate_password;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// Events never carry the password itself so they are safe to log. Subscribers
/// read the current password from a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Length or character options changed
    OptionsChanged { options: GeneratorOptions },

    /// A new password has been published
    PasswordGenerated { length: usize, generation: u64 },

    /// The copy feedback flag flipped
    CopyStateChanged { copied: bool },
}

/// Thread-safe state manager with event emission
///
/// This is the central state container that:
/// - Provides thread-safe access to [`AppState`] via `Arc<RwLock<T>>`
/// - Regenerates the password synchronously whenever the options change
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Related Types
///
/// - [`crate::models::AppState`]: The underlying state structure
/// - [`CopyController`]: Drives the copy flag
/// - [`crate::ui::controller::GuiController`]: Primary consumer of state events
pub struct StateManager {
    /// The application state protected by RwLock for thread-safe access
    state: Arc<RwLock<AppState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a manager with default options and an initial password.
    pub fn new() -> Self {
        Self::with_options(GeneratorOptions::default())
    }

    /// Create a manager with the given starting options and an initial password.
    ///
    /// No event is emitted for the initial password; there are no subscribers yet.
    pub fn with_options(options: GeneratorOptions) -> Self {
        let (state_tx, _) = broadcast::channel(100);

        let mut state = AppState::with_options(options);
        Self::recompute(&mut state);

        tracing::debug!(
            "Initial password generated: length={}, digits={}, special={}",
            options.length,
            options.include_digits,
            options.include_special
        );

        Self {
            state: Arc::new(RwLock::new(state)),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let password = state_manager.read(|state| state.password.clone());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AppState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// Captures the old state, applies the update, then emits an event for
    /// everything that differs.
    ///
    /// # Returns
    /// The StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut AppState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = Self::detect_changes(&old_state, &state);
        drop(state);

        for change in &changes {
            // No subscribers is fine
            if self.state_tx.send(change.clone()).is_ok() {
                metrics::global().record_state_broadcast();
            }
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(old: &AppState, new: &AppState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.options != new.options {
            changes.push(StateChange::OptionsChanged {
                options: new.options,
            });
        }

        if old.generation != new.generation {
            changes.push(StateChange::PasswordGenerated {
                length: new.password.chars().count(),
                generation: new.generation,
            });
        }

        if old.copied != new.copied {
            changes.push(StateChange::CopyStateChanged { copied: new.copied });
        }

        changes
    }

    /// Rebuild the pool, resample and publish a password for `state.options`.
    fn recompute(state: &mut AppState) {
        let password = generate_password(&state.options);
        state.publish_password(password);
        metrics::global().record_password_generated();
    }

    /// Apply an options edit and regenerate if anything actually changed.
    fn reconfigure<F>(&self, edit: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut GeneratorOptions),
    {
        self.update(|state| {
            let before = state.options;
            edit(&mut state.options);

            if state.options != before {
                Self::recompute(state);
                tracing::debug!(
                    "Options changed: length={}, digits={}, special={}",
                    state.options.length,
                    state.options.include_digits,
                    state.options.include_special
                );
            }
        })
    }

    // Convenience methods for the user actions

    /// Replace all options at once
    pub fn set_options(&self, options: GeneratorOptions) -> Vec<StateChange> {
        self.reconfigure(|current| *current = options)
    }

    pub fn set_length(&self, length: PasswordLength) -> Vec<StateChange> {
        self.reconfigure(|options| options.length = length)
    }

    pub fn set_include_digits(&self, include: bool) -> Vec<StateChange> {
        self.reconfigure(|options| options.include_digits = include)
    }

    pub fn set_include_special(&self, include: bool) -> Vec<StateChange> {
        self.reconfigure(|options| options.include_special = include)
    }

    /// Generate a new password with the current options, unconditionally
    pub fn regenerate(&self) -> Vec<StateChange> {
        self.update(Self::recompute)
    }

    /// Set the copy feedback flag
    pub fn set_copied(&self, copied: bool) -> Vec<StateChange> {
        self.update(|state| state.copied = copied)
    }

    /// Current options
    pub fn options(&self) -> GeneratorOptions {
        self.read(|state| state.options)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
