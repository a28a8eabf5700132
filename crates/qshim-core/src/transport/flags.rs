//! Per-connection control flags for engine drivers.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::transport::EngineConnection;

/// Atomic flag block an engine driver embeds per connection.
///
/// The driver owns the block and keeps the blocked bits current from engine
/// callbacks; the facade side only touches it through [`EngineConnection`].
/// No locking here: the flags are advisory and the driver's loop is the
/// sole consumer.
#[derive(Debug, Default)]
pub struct ConnFlags {
    /// Set by the facade, cleared by the driver loop via
    /// [`ConnFlags::take_poll_request`].
    poll_requested: AtomicBool,
    /// Connection-level flow-control credit exhausted.
    flow_blocked: AtomicBool,
    /// Some stream's flow-control credit exhausted.
    stream_blocked: AtomicBool,
    /// One-way: set through the seam, read by the driver at handshake and
    /// ack-generation time.
    ack_delay_disabled: AtomicBool,
}

impl ConnFlags {
    /// Create a block with all flags clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the poll-request flag and report whether it was set.
    ///
    /// Driver-side: the flag is settable from anywhere but cleared only
    /// here.
    pub fn take_poll_request(&self) -> bool {
        self.poll_requested.swap(false, Ordering::AcqRel)
    }

    /// Read the poll-request flag without clearing it.
    pub fn poll_requested(&self) -> bool {
        self.poll_requested.load(Ordering::Acquire)
    }

    /// Driver-side: record connection-level flow-control state.
    pub fn set_flow_blocked(&self, blocked: bool) {
        self.flow_blocked.store(blocked, Ordering::Release);
    }

    /// Driver-side: record stream-level flow-control state.
    pub fn set_stream_blocked(&self, blocked: bool) {
        self.stream_blocked.store(blocked, Ordering::Release);
    }

    /// Whether delayed acknowledgements have been switched off.
    pub fn ack_delay_disabled(&self) -> bool {
        self.ack_delay_disabled.load(Ordering::Acquire)
    }
}

impl EngineConnection for ConnFlags {
    fn set_poll_requested(&self) {
        self.poll_requested.store(true, Ordering::Release);
    }

    fn flow_credit_exhausted(&self) -> bool {
        self.flow_blocked.load(Ordering::Acquire)
    }

    fn stream_credit_exhausted(&self) -> bool {
        self.stream_blocked.load(Ordering::Acquire)
    }

    fn set_ack_delay_disabled(&self) {
        self.ack_delay_disabled.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_block_is_clear() {
        let flags = ConnFlags::new();
        assert!(!flags.poll_requested());
        assert!(!flags.flow_credit_exhausted());
        assert!(!flags.stream_credit_exhausted());
        assert!(!flags.ack_delay_disabled());
    }

    #[test]
    fn take_poll_request_clears() {
        let flags = ConnFlags::new();
        flags.set_poll_requested();
        assert!(flags.poll_requested());
        assert!(flags.take_poll_request());
        assert!(!flags.poll_requested());
        // Second take without an intervening request reports clear.
        assert!(!flags.take_poll_request());
    }

    #[test]
    fn blocked_bits_are_independent() {
        let flags = ConnFlags::new();
        flags.set_flow_blocked(true);
        assert!(flags.flow_credit_exhausted());
        assert!(!flags.stream_credit_exhausted());
        flags.set_flow_blocked(false);
        flags.set_stream_blocked(true);
        assert!(!flags.flow_credit_exhausted());
        assert!(flags.stream_credit_exhausted());
    }

    #[test]
    fn ack_delay_flag_is_one_way_through_the_seam() {
        let flags = ConnFlags::new();
        flags.set_ack_delay_disabled();
        flags.set_ack_delay_disabled();
        assert!(flags.ack_delay_disabled());
    }
}
