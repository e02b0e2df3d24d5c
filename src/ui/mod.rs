// UI module - GUI logic and event loop bridge
//
// This module contains:
// - EventLoopBridge: Marshals UI updates from background threads onto the Slint event loop
// - GuiController: Main controller that wires up the UI with state management

pub mod bridge;
pub mod controller;

pub use bridge::{EventLoopBridge, EventLoopBridgeHandle};
pub use controller::GuiController;
