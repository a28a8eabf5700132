//! Fake engine-side doubles.
//!
//! `FakeConn` stands in for an engine-owned connection so facade behavior
//! can be asserted without an engine: flags are injectable, and every seam
//! call is recorded in order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use qshim_core::error::{Error, Result};
use qshim_core::transport::{EngineConnection, StreamSink};

/// One recorded seam invocation on a [`FakeConn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    SetPollRequested,
    FlowCreditExhausted,
    StreamCreditExhausted,
    SetAckDelayDisabled,
}

/// A scriptable engine connection.
#[derive(Debug, Default)]
pub struct FakeConn {
    poll_requested: AtomicBool,
    flow_blocked: AtomicBool,
    stream_blocked: AtomicBool,
    ack_delay_disabled: AtomicBool,
    calls: Mutex<Vec<Call>>,
}

impl FakeConn {
    /// A connection with all flags clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// A connection with the two blocked flags scripted.
    pub fn blocked(flow: bool, stream: bool) -> Self {
        let conn = Self::new();
        conn.flow_blocked.store(flow, Ordering::Relaxed);
        conn.stream_blocked.store(stream, Ordering::Relaxed);
        conn
    }

    /// Inject connection-level flow-control state.
    pub fn set_flow_blocked(&self, blocked: bool) {
        self.flow_blocked.store(blocked, Ordering::Relaxed);
    }

    /// Inject stream-level flow-control state.
    pub fn set_stream_blocked(&self, blocked: bool) {
        self.stream_blocked.store(blocked, Ordering::Relaxed);
    }

    /// Whether the facade has requested a poll.
    pub fn poll_requested(&self) -> bool {
        self.poll_requested.load(Ordering::Relaxed)
    }

    /// Whether the facade has disabled ack delay.
    pub fn ack_delay_disabled(&self) -> bool {
        self.ack_delay_disabled.load(Ordering::Relaxed)
    }

    /// Seam invocations so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Seam invocations that mutated connection state, in order.
    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::SetPollRequested | Call::SetAckDelayDisabled))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl EngineConnection for FakeConn {
    fn set_poll_requested(&self) {
        self.record(Call::SetPollRequested);
        self.poll_requested.store(true, Ordering::Relaxed);
    }

    fn flow_credit_exhausted(&self) -> bool {
        self.record(Call::FlowCreditExhausted);
        self.flow_blocked.load(Ordering::Relaxed)
    }

    fn stream_credit_exhausted(&self) -> bool {
        self.record(Call::StreamCreditExhausted);
        self.stream_blocked.load(Ordering::Relaxed)
    }

    fn set_ack_delay_disabled(&self) {
        self.record(Call::SetAckDelayDisabled);
        self.ack_delay_disabled.store(true, Ordering::Relaxed);
    }
}

/// A scriptable stream sink.
///
/// Records writes and resets; failures are injectable per call.
#[derive(Debug, Default)]
pub struct FakeStream {
    written: Vec<(Vec<u8>, bool)>,
    resets: Vec<u64>,
    fail_next_write: bool,
    fail_resets: bool,
}

impl FakeStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next write fail with a transport error.
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }

    /// Make every reset fail with a transport error.
    pub fn fail_resets(&mut self) {
        self.fail_resets = true;
    }

    /// Writes accepted so far as `(data, fin)` pairs.
    pub fn written(&self) -> Vec<(Vec<u8>, bool)> {
        self.written.clone()
    }

    /// Error codes of resets received so far.
    pub fn resets(&self) -> Vec<u64> {
        self.resets.clone()
    }
}

impl StreamSink for FakeStream {
    fn write(&mut self, data: &[u8], fin: bool) -> Result<usize> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(Error::Transport {
                message: "scripted write failure".into(),
            });
        }
        self.written.push((data.to_vec(), fin));
        Ok(data.len())
    }

    fn reset(&mut self, error_code: u64) -> Result<()> {
        if self.fail_resets {
            return Err(Error::Transport {
                message: "scripted reset failure".into(),
            });
        }
        self.resets.push(error_code);
        Ok(())
    }
}
