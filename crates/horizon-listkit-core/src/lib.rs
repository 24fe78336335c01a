//! Core systems for Horizon Listkit.
//!
//! This crate provides the foundational pieces the list engine is built on:
//!
//! - **Signal/Slot System**: Type-safe, synchronous change notification with
//!   buffering for batched mutations
//! - **Clocks**: Injectable time sources ([`SystemClock`], [`ManualClock`])
//! - **Timers**: Host-polled one-shot timers
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_listkit_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use horizon_listkit_core::{ManualClock, TimerManager};
//!
//! let clock = ManualClock::shared();
//! let mut timers = TimerManager::new(clock.clone());
//! let id = timers.start_one_shot(Duration::from_millis(800));
//!
//! clock.advance(Duration::from_millis(800));
//! assert_eq!(timers.process_expired(), vec![id]);
//! ```

mod clock;
mod error;
pub mod logging;
pub mod signal;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, TimerError};
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal, SignalEmitter, buffer_events};
pub use timer::{TimerId, TimerManager};
