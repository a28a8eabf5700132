//! qshim-test-utils: test doubles for the engine seam.
//!
//! Provides:
//! - FakeConn: scriptable engine connection with a recorded call log
//! - FakeStream: scriptable stream sink with programmable failures

mod fake_engine;

pub use fake_engine::{Call, FakeConn, FakeStream};
