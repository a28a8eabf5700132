//! Stream write helper over the engine's send surface.

use tracing::debug;

use crate::error::Result;

/// Application error code sent when the shim resets a stream after an
/// internal failure.
pub const APP_INTERNAL_ERROR: u64 = 0x5101;

/// Application error code sent when the local side cancels a transfer.
pub const APP_CANCEL_ERROR: u64 = 0x5102;

/// Minimal send capability of an engine stream.
///
/// Like the connection seam, implementors borrow engine-owned state; the
/// engine's serialization discipline applies.
pub trait StreamSink {
    /// Write `data` to the stream, optionally finishing it. Returns the
    /// number of bytes the engine accepted.
    fn write(&mut self, data: &[u8], fin: bool) -> Result<usize>;

    /// Abruptly terminate the stream with an application error code.
    fn reset(&mut self, error_code: u64) -> Result<()>;
}

/// Write to a stream, resetting it on failure.
///
/// On a failed write the stream is reset with [`APP_INTERNAL_ERROR`] so the
/// peer stops waiting for data that will never come, and the original write
/// error is returned. A failure of the reset itself is logged and swallowed:
/// at that point the connection is going away anyway.
pub fn write_or_reset<S: StreamSink>(stream: &mut S, data: &[u8], fin: bool) -> Result<usize> {
    match stream.write(data, fin) {
        Ok(n) => Ok(n),
        Err(err) => {
            if let Err(reset_err) = stream.reset(APP_INTERNAL_ERROR) {
                debug!(error = %reset_err, "reset after failed write also failed");
            }
            Err(err)
        }
    }
}
