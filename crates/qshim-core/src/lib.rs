//! qshim-core: control shim over an externally owned QUIC engine.
//!
//! This crate provides:
//! - The engine seam (`EngineConnection`) and the transport control facade
//!   (poll request, blocked query, ack-delay disable)
//! - A per-connection atomic flag block for engine drivers (`ConnFlags`)
//! - Library-agnostic transport tuning
//! - Socket-address conversion at the C boundary
//! - A microsecond wall-clock query with per-platform implementations
//! - Logging setup

pub mod error;
pub mod logging;
pub mod time;
pub mod transport;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat};
pub use time::{wall_clock_now, WallClock};
