use super::options::GeneratorOptions;

/// Single source of truth for the generator window.
///
/// # Thread Safety
///
/// `AppState` is wrapped in `Arc<RwLock<AppState>>` by [`crate::state::StateManager`].
/// Never mutate it directly - go through the manager so change events are emitted:
/// - [`read()`](crate::state::StateManager::read) for read-only access
/// - [`update()`](crate::state::StateManager::update) for mutations
///
/// # Related Types
///
/// - [`crate::state::StateChange`]: Event types for state mutations
/// - [`crate::models::UserSettings`]: Saved defaults that seed `options`
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Current generator configuration
    pub options: GeneratorOptions,

    /// Password currently on display. Replaced wholesale on every recomputation.
    pub password: String,

    /// True for a short time after a successful copy
    pub copied: bool,

    /// Incremented on every recomputation so that a regenerated password is
    /// detected even when it happens to equal the previous one.
    pub generation: u64,
}

impl AppState {
    /// Create a state for the given options with no password yet.
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the current password and bump the generation counter.
    pub fn publish_password(&mut self, password: String) {
        self.password = password;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Copy button label for the current copy state.
    pub fn copy_label(&self) -> &'static str {
        copy_label_for(self.copied)
    }
}

/// Copy button label for a given copy state.
pub fn copy_label_for(copied: bool) -> &'static str {
    if copied { "Copied \u{2714}" } else { "Copy" }
}
