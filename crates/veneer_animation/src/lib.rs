//! Veneer Timing
//!
//! Time sources and timers for UI behaviors that trail user input.
//!
//! # Features
//!
//! - **Clocks**: Wall-clock and manually advanced time behind one trait
//! - **Timers**: Deadline-ordered timers polled from the host's frame loop
//! - **Debounce**: A restartable timer handle where each trigger replaces
//!   the pending deadline

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock, Timestamp};
pub use scheduler::{Debounce, TimerId, TimerScheduler};
