// EventLoopBridge - Marshals UI updates onto the Slint event loop
//
// State change events arrive on a background subscription thread, but Slint
// components may only be touched from the event loop thread. The bridge queues
// update closures on a bounded channel and a handler thread forwards each one
// with `upgrade_in_event_loop`.

use crate::metrics;
use slint::ComponentHandle;
use tokio::sync::mpsc;

/// A queued UI mutation
type UiUpdate<T> = Box<dyn FnOnce(&T) + Send>;

/// Capacity of the update channel. Updates beyond this are dropped rather than
/// growing memory if the event loop stalls.
const UI_UPDATE_CAPACITY: usize = 100;

/// Coordinates UI updates from other threads with the Slint event loop
///
/// # Example
/// ```ignore
/// let ui = MainWindow::new()?;
/// let bridge = EventLoopBridge::new(&ui);
///
/// let handle = bridge.clone_handle();
/// std::thread::spawn(move || {
///     handle.update_ui(|ui| ui.set_password("...".into()));
/// });
/// ```
pub struct EventLoopBridge<T: ComponentHandle> {
    ui_update_tx: mpsc::Sender<UiUpdate<T>>,
}

impl<T: ComponentHandle + 'static> EventLoopBridge<T> {
    /// Create a new EventLoopBridge and its handler thread
    pub fn new(ui: &T) -> Self {
        // Weak so the handler thread never keeps the window alive
        let ui_weak = ui.as_weak();
        let (ui_update_tx, mut ui_update_rx) = mpsc::channel::<UiUpdate<T>>(UI_UPDATE_CAPACITY);

        std::thread::spawn(move || {
            tracing::debug!("EventLoopBridge handler thread started");

            while let Some(update_fn) = ui_update_rx.blocking_recv() {
                let result = ui_weak.upgrade_in_event_loop(move |ui| {
                    update_fn(&ui);
                });

                if let Err(e) = result {
                    // The event loop has stopped; nothing left to update
                    tracing::warn!("Failed to queue UI update to event loop: {:?}", e);
                    break;
                }
            }

            tracing::debug!("EventLoopBridge handler thread terminated");
        });

        Self { ui_update_tx }
    }

    /// Schedule a UI update from any thread
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        queue_update(&self.ui_update_tx, Box::new(update));
    }

    /// Cloneable handle for threads and callbacks
    pub fn clone_handle(&self) -> EventLoopBridgeHandle<T> {
        EventLoopBridgeHandle {
            ui_update_tx: self.ui_update_tx.clone(),
        }
    }
}

/// Lightweight handle that can be cloned and moved to other threads
pub struct EventLoopBridgeHandle<T: ComponentHandle> {
    ui_update_tx: mpsc::Sender<UiUpdate<T>>,
}

// Manual Clone implementation to avoid requiring T: Clone
impl<T: ComponentHandle> Clone for EventLoopBridgeHandle<T> {
    fn clone(&self) -> Self {
        Self {
            ui_update_tx: self.ui_update_tx.clone(),
        }
    }
}

impl<T: ComponentHandle + 'static> EventLoopBridgeHandle<T> {
    /// Schedule a UI update from any thread
    ///
    /// See `EventLoopBridge::update_ui()` for details.
    pub fn update_ui<F>(&self, update: F)
    where
        F: FnOnce(&T) + Send + 'static,
    {
        queue_update(&self.ui_update_tx, Box::new(update));
    }
}

/// Push an update onto the channel without blocking.
///
/// Returns false if the update was dropped.
fn queue_update<T>(tx: &mpsc::Sender<UiUpdate<T>>, update: UiUpdate<T>) -> bool {
    match tx.try_send(update) {
        Ok(()) => {
            metrics::global().record_ui_update();
            true
        }
        Err(mpsc::error::TrySendError::Full(_)) => {
            metrics::global().record_ui_channel_full();
            tracing::warn!("UI update channel full - skipping update to prevent backpressure");
            false
        }
        Err(mpsc::error::TrySendError::Closed(_)) => {
            tracing::warn!("Failed to send UI update - handler thread has stopped");
            false
        }
    }
}
