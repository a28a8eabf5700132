//! Error types for qshim-core.

use thiserror::Error;

/// Main error type for qshim operations.
///
/// The three control-facade operations never fail: an absent connection is a
/// documented no-op, not an error. This type covers the fallible edges of
/// the shim only (tuning validation, address conversion, stream writes).
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from underlying system calls.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid transport tuning.
    #[error("tuning error: {message}")]
    Tuning { message: String },

    /// Socket-address conversion failure at the C boundary.
    #[error("address error: {message}")]
    Address { message: String },

    /// Transport-level failure reported by the engine.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The stream was reset.
    #[error("stream reset (code {0:#x})")]
    StreamReset(u64),
}

impl Error {
    /// Returns true if this error is transient and retrying may help.
    ///
    /// Tuning and address errors are caller bugs; transport and I/O failures
    /// depend on the engine and the network.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Transport { .. } | Error::StreamReset(_))
    }
}

/// Convenience result type for qshim operations.
pub type Result<T> = std::result::Result<T, Error>;
