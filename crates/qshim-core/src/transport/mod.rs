//! Transport seam and control surface over an external QUIC engine.
//!
//! The engine (QUIC state machine, TLS, congestion control) lives elsewhere
//! and owns every connection. This module is the one place that knows which
//! connection-internal booleans the rest of the stack is allowed to touch:
//!
//! - `EngineConnection`: the capability seam over those booleans
//! - `control`: the facade callers use (poll request, blocked query,
//!   ack-delay disable), with the null/neutral contracts spelled out
//! - `ConnFlags`: a ready-made flag block for drivers that host the seam
//!   in-process

#[cfg(unix)]
pub mod addr;
pub mod config;
pub mod control;
pub mod flags;
pub mod stream;

pub use config::{CongestionControl, TransportTuning, TuningBuilder};
pub use control::{disable_ack_delay, is_flow_blocked, request_poll};
pub use flags::ConnFlags;
pub use stream::{write_or_reset, StreamSink, APP_CANCEL_ERROR, APP_INTERNAL_ERROR};

#[cfg(unix)]
pub use addr::{sockaddr_storage_to_socket_addr, socket_addr_to_storage};

/// Raw view of the engine-internal connection flags.
///
/// This trait is the single seam with knowledge of the engine's connection
/// internals; everything above it goes through [`control`]. Implementors
/// borrow state the engine owns; they never copy it, and a handle must not
/// be retained beyond the duration of a call.
///
/// # Threading
///
/// The engine serializes access to connection state (single-threaded event
/// loop or its own locking). This seam documents that discipline and adds no
/// locking of its own: call these methods only from contexts the engine
/// already serializes.
pub trait EngineConnection {
    /// Set the poll-request flag. Cleared by the engine's own event loop.
    fn set_poll_requested(&self);

    /// Whether connection-level flow-control credit is exhausted.
    fn flow_credit_exhausted(&self) -> bool;

    /// Whether any stream's flow-control credit is exhausted.
    fn stream_credit_exhausted(&self) -> bool;

    /// Set the ack-delay-disable flag. One-way: never cleared through this
    /// seam.
    fn set_ack_delay_disabled(&self);
}
