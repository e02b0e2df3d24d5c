// Copy-to-clipboard action
//
// Writes the current password to the clipboard and drives the transient
// CopyState flag. Each successful copy cancels the pending reset and schedules
// a new one, so two quick copies keep the flag up until the delay has passed
// since the second. Every copy is numbered and a reset only clears the flag
// for the latest number.

use super::StateManager;
use crate::metrics;
use crate::models::DEFAULT_COPY_FEEDBACK_MS;
use crate::services::{ClipboardError, ClipboardWriter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Copies passwords and manages the "Copied" feedback window.
pub struct CopyController {
    state: Arc<StateManager>,

    clipboard: Box<dyn ClipboardWriter + Send + Sync>,

    /// How long CopyState stays true after a copy
    feedback: Duration,

    /// Runtime that runs the reset timer
    runtime: tokio::runtime::Handle,

    /// Reset task for the most recent copy, if it has not fired yet
    pending_reset: Mutex<Option<JoinHandle<()>>>,

    /// Number of the most recent successful copy
    sequence: Arc<AtomicU64>,
}

impl CopyController {
    /// Create a controller with the default 1000ms feedback window.
    pub fn new(
        state: Arc<StateManager>,
        clipboard: Box<dyn ClipboardWriter + Send + Sync>,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            state,
            clipboard,
            feedback: Duration::from_millis(DEFAULT_COPY_FEEDBACK_MS),
            runtime,
            pending_reset: Mutex::new(None),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_feedback_duration(mut self, feedback: Duration) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn feedback_duration(&self) -> Duration {
        self.feedback
    }

    /// Copy whatever password is currently published.
    pub fn copy_current(&self) -> Result<(), ClipboardError> {
        let password = self.state.read(|s| s.password.clone());
        self.copy(&password)
    }

    /// Write `text` to the clipboard and raise CopyState.
    ///
    /// On failure CopyState is left untouched and the error is returned after
    /// being logged.
    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        if let Err(e) = self.clipboard.write_text(text) {
            tracing::warn!("Failed to copy password to clipboard: {}", e);
            metrics::global().record_clipboard_failure();
            return Err(e);
        }

        metrics::global().record_copy();
        tracing::info!("Copied {}-character password to clipboard", text.chars().count());

        // Held across the rise and the reschedule so concurrent copies are serialized
        let mut pending = self
            .pending_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = pending.take() {
            previous.abort();
            tracing::trace!("Cancelled pending copy feedback reset");
        }

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.set_copied(true);
        *pending = Some(self.spawn_reset(ticket));

        Ok(())
    }

    /// Whether a reset task is still waiting to fire.
    pub fn has_pending_reset(&self) -> bool {
        self.pending_reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Spawn the timer that lowers CopyState for copy number `ticket`.
    ///
    /// An aborted task may already be past its sleep, so the flag is only
    /// cleared while `ticket` is still the latest copy. The check runs under
    /// the state write lock.
    fn spawn_reset(&self, ticket: u64) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let sequence = Arc::clone(&self.sequence);
        let delay = self.feedback;

        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let changes = state.update(|s| {
                if sequence.load(Ordering::SeqCst) == ticket {
                    s.copied = false;
                }
            });

            if changes.is_empty() {
                tracing::trace!("Stale copy feedback reset #{} ignored", ticket);
            } else {
                tracing::debug!("Copy feedback expired");
            }
        })
    }
}

impl Drop for CopyController {
    fn drop(&mut self) {
        if let Some(handle) = self
            .pending_reset
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clipboard::MockClipboardWriter;

    fn controller(mock: MockClipboardWriter) -> (Arc<StateManager>, CopyController) {
        let state = Arc::new(StateManager::new());
        let copy = CopyController::new(
            Arc::clone(&state),
            Box::new(mock),
            tokio::runtime::Handle::current(),
        );
        (state, copy)
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_current_writes_password() {
        let state = Arc::new(StateManager::new());
        let expected = state.read(|s| s.password.clone());

        let mut mock = MockClipboardWriter::new();
        mock.expect_write_text()
            .withf(move |text: &str| text == expected)
            .times(1)
            .returning(|_| Ok(()));

        let copy = CopyController::new(
            Arc::clone(&state),
            Box::new(mock),
            tokio::runtime::Handle::current(),
        );

        copy.copy_current().unwrap();
        assert!(state.read(|s| s.copied));
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_state_resets_after_delay() {
        let mut mock = MockClipboardWriter::new();
        mock.expect_write_text().returning(|_| Ok(()));
        let (state, copy) = controller(mock);

        copy.copy_current().unwrap();
        assert!(state.read(|s| s.copied));
        assert!(copy.has_pending_reset());

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert!(state.read(|s| s.copied));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!state.read(|s| s.copied));
        assert!(!copy.has_pending_reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_reschedules_reset() {
        let mut mock = MockClipboardWriter::new();
        mock.expect_write_text().times(2).returning(|_| Ok(()));
        let (state, copy) = controller(mock);

        copy.copy_current().unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;
        copy.copy_current().unwrap();

        // The first copy's reset would have fired at 1000ms
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(state.read(|s| s.copied));

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(!state.read(|s| s.copied));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_reset_does_not_clear_newer_copy() {
        let mut mock = MockClipboardWriter::new();
        mock.expect_write_text().times(2).returning(|_| Ok(()));
        let (state, copy) = controller(mock);

        copy.copy_current().unwrap();
        tokio::time::sleep(Duration::from_millis(600)).await;

        // A reset for copy #1 that outlives its abort, firing at 1600ms
        let stale = copy.spawn_reset(1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        copy.copy_current().unwrap();

        stale.await.unwrap();
        assert!(state.read(|s| s.copied));

        // Copy #2 resets at 1700ms
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!state.read(|s| s.copied));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_leaves_state_unset() {
        let mut mock = MockClipboardWriter::new();
        mock.expect_write_text()
            .times(1)
            .returning(|_| Err(ClipboardError::Unavailable("no display".to_string())));
        let (state, copy) = controller(mock);

        let result = copy.copy_current();

        assert_eq!(
            result,
            Err(ClipboardError::Unavailable("no display".to_string()))
        );
        assert!(!state.read(|s| s.copied));
        assert!(!copy.has_pending_reset());
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_feedback_duration() {
        let mut mock = MockClipboardWriter::new();
        mock.expect_write_text().returning(|_| Ok(()));
        let (state, copy) = controller(mock);
        let copy = copy.with_feedback_duration(Duration::from_millis(250));

        copy.copy("abcdefgh").unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(copy.feedback_duration(), Duration::from_millis(250));
        assert!(!state.read(|s| s.copied));
    }
}
