//! Transport control facade.
//!
//! Three narrow operations over an engine-owned connection. Every operation
//! takes `Option<&C>`: an absent connection is a valid, inert input with a
//! documented neutral result, never an error. None of these block, suspend,
//! or perform I/O, and none of them make ordering promises about when the
//! engine acts on what they set.

use tracing::trace;

use super::EngineConnection;

/// Ask the engine to schedule a processing pass for this connection.
///
/// Purely advisory: sets the poll-request flag and nothing else. The engine
/// clears the flag when it runs; there is no guarantee of immediacy. With
/// `None` this is a no-op.
pub fn request_poll<C: EngineConnection>(conn: Option<&C>) {
    let Some(conn) = conn else {
        return;
    };
    conn.set_poll_requested();
    trace!("poll requested");
}

/// Whether the send path is currently blocked on flow control.
///
/// True if either the connection-level limit or any stream-level limit
/// prevents sending. Recomputed from the engine flags on every call, never
/// cached. With `None` this is `false`.
pub fn is_flow_blocked<C: EngineConnection>(conn: Option<&C>) -> bool {
    let Some(conn) = conn else {
        return false;
    };
    conn.flow_credit_exhausted() || conn.stream_credit_exhausted()
}

/// Stop the connection from negotiating or applying delayed acknowledgements.
///
/// Idempotent: the flag is one-way and repeated calls are equivalent to one.
/// With `None` this is a no-op.
pub fn disable_ack_delay<C: EngineConnection>(conn: Option<&C>) {
    let Some(conn) = conn else {
        return;
    };
    conn.set_ack_delay_disabled();
    trace!("ack delay disabled");
}
