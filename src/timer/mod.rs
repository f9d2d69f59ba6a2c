//! Timer core
//!
//! This module holds the countdown state machine:
//! - The cancellable once-per-second tick source
//! - The widget that owns the countdown, its run state and the ticker

pub mod ticker;
pub mod widget;

pub use ticker::Ticker;
pub use widget::{TimerEvent, TimerWidget};
