//! Signal/slot system for Horizon Listkit.
//!
//! Signals are emitted by list components when their state changes, and
//! connected slots (callbacks) are invoked in response. Delivery is always
//! synchronous: every slot runs on the call stack of the `emit` that produced
//! it, unless the signal is currently buffering.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`SignalEmitter`] - Type-erased access for blocking and buffering
//!
//! # Buffering
//!
//! A batch of mutations that touches several signals can defer delivery with
//! [`Signal::begin_buffer`] / [`Signal::end_buffer`]. Emissions made while a
//! signal is buffering are queued and delivered, in order, when the outermost
//! buffer ends. Subscribers therefore observe the fully updated state.
//!
//! # Example
//!
//! ```
//! use horizon_listkit_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a struct/tuple for richer payloads.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync`. Slots are invoked directly on the emitting
/// thread.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
    /// Nesting depth of active buffers.
    buffer_depth: AtomicUsize,
    /// Emissions queued while buffering.
    pending: Mutex<Vec<Args>>,
}

impl<Args: Clone + Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
            buffer_depth: AtomicUsize::new(0),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` are dropped, including while buffering.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Start (or nest) a buffer. Emissions are queued until the matching
    /// [`end_buffer`](Self::end_buffer).
    pub fn begin_buffer(&self) {
        self.buffer_depth.fetch_add(1, Ordering::SeqCst);
    }

    /// End a buffer. When the outermost buffer ends, queued emissions are
    /// delivered in the order they were made.
    pub fn end_buffer(&self) {
        let depth = self.buffer_depth.load(Ordering::SeqCst);
        if depth == 0 {
            tracing::warn!(
                target: targets::SIGNAL,
                "end_buffer called without matching begin_buffer"
            );
            return;
        }

        if self.buffer_depth.fetch_sub(1, Ordering::SeqCst) == 1 {
            let pending = std::mem::take(&mut *self.pending.lock());
            tracing::trace!(
                target: targets::SIGNAL,
                flushed = pending.len(),
                "flushing buffered emissions"
            );
            for args in pending {
                self.deliver(&args);
            }
        }
    }

    /// Whether the signal is currently buffering emissions.
    pub fn is_buffering(&self) -> bool {
        self.buffer_depth.load(Ordering::SeqCst) > 0
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. If it is buffering, the
    /// arguments are queued.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        if self.is_buffering() {
            self.pending.lock().push(args);
            return;
        }

        self.deliver(&args);
    }

    fn deliver(&self, args: &Args) {
        // Snapshot the slots so a slot may connect or disconnect re-entrantly.
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);

/// Type-erased signal access.
///
/// This allows a component to block or buffer a group of signals with
/// different argument types uniformly.
pub trait SignalEmitter: Send + Sync {
    /// Disconnect a connection by ID.
    fn disconnect(&self, id: ConnectionId) -> bool;

    /// Disconnect all connections.
    fn disconnect_all(&self);

    /// Get the number of connections.
    fn connection_count(&self) -> usize;

    /// Check if blocked.
    fn is_blocked(&self) -> bool;

    /// Set blocked state.
    fn set_blocked(&self, blocked: bool);

    /// Start buffering emissions.
    fn begin_buffer(&self);

    /// Stop buffering, flushing queued emissions at the outermost level.
    fn end_buffer(&self);
}

impl<Args: Clone + Send + 'static> SignalEmitter for Signal<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        Signal::disconnect(self, id)
    }

    fn disconnect_all(&self) {
        Signal::disconnect_all(self);
    }

    fn connection_count(&self) -> usize {
        Signal::connection_count(self)
    }

    fn is_blocked(&self) -> bool {
        Signal::is_blocked(self)
    }

    fn set_blocked(&self, blocked: bool) {
        Signal::set_blocked(self, blocked);
    }

    fn begin_buffer(&self) {
        Signal::begin_buffer(self);
    }

    fn end_buffer(&self) {
        Signal::end_buffer(self);
    }
}

/// Run `f` with every signal in `signals` buffering, then flush them in order.
///
/// Each signal's queued emissions are delivered only after `f` returns, so
/// subscribers of any of the signals see the state after the whole batch.
pub fn buffer_events<R>(signals: &[&dyn SignalEmitter], f: impl FnOnce() -> R) -> R {
    for signal in signals {
        signal.begin_buffer();
    }
    let result = f();
    for signal in signals {
        signal.end_buffer();
    }
    result
}
