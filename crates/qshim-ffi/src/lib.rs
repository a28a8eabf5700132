//! C ABI surface for the qshim control facade.
//!
//! Exposes the three control operations, a create/free pair so C harnesses
//! can host a connection flag block, and the microsecond wall-clock query.
//! Every entry point tolerates a null handle: raw pointers become
//! `Option<&_>` at the boundary and the facade's neutral-result contracts
//! apply. Nothing here can panic, so no unwind ever crosses the boundary.

use std::ffi::c_int;
use std::mem;

use qshim_core::time::wall_clock_now;
use qshim_core::transport::{control, ConnFlags};

// =============================================================================
// Buffer descriptor
// =============================================================================

/// Borrowed byte range crossing the C boundary: base pointer plus length.
///
/// The layout is part of the ABI contract with the engine side (`base` at
/// offset zero, `len` immediately after at pointer width) and is pinned by
/// the compile-time assertions below. Build breaks here mean the descriptor
/// drifted out of sync with the other side; there is no runtime recovery for
/// that, so there is no runtime check.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct BufRef {
    pub base: *const u8,
    pub len: usize,
}

const _: () = {
    assert!(mem::offset_of!(BufRef, base) == 0);
    assert!(mem::offset_of!(BufRef, len) == mem::size_of::<*const u8>());
    assert!(mem::size_of::<BufRef>() == 2 * mem::size_of::<*const u8>());
};

impl BufRef {
    /// The empty descriptor: null base, zero length.
    pub const fn empty() -> Self {
        Self {
            base: std::ptr::null(),
            len: 0,
        }
    }

    /// View the described range as a slice. A null base yields the empty
    /// slice regardless of `len`.
    ///
    /// # Safety
    ///
    /// A non-null `base` must point to `len` readable bytes that outlive the
    /// returned slice and are not written to while it is alive.
    pub unsafe fn as_slice<'a>(&self) -> &'a [u8] {
        if self.base.is_null() {
            return &[];
        }
        std::slice::from_raw_parts(self.base, self.len)
    }
}

impl From<&[u8]> for BufRef {
    fn from(slice: &[u8]) -> Self {
        Self {
            base: slice.as_ptr(),
            len: slice.len(),
        }
    }
}

// =============================================================================
// Connection handle
// =============================================================================

/// Allocate a connection flag block and return an owned handle.
///
/// The caller releases it with [`qshim_conn_free`]. Never returns null.
#[no_mangle]
pub extern "C" fn qshim_conn_new() -> *mut ConnFlags {
    Box::into_raw(Box::new(ConnFlags::new()))
}

/// Release a handle from [`qshim_conn_new`]. Null is a no-op.
///
/// # Safety
///
/// `conn` must be null or a handle obtained from [`qshim_conn_new`] that has
/// not already been freed.
#[no_mangle]
pub unsafe extern "C" fn qshim_conn_free(conn: *mut ConnFlags) {
    if !conn.is_null() {
        drop(Box::from_raw(conn));
    }
}

// =============================================================================
// Control entry points
// =============================================================================

/// Ask the engine to schedule a processing pass for `conn`. Advisory; null
/// is a no-op.
///
/// # Safety
///
/// `conn` must be null or a live handle, accessed under the engine's
/// serialization discipline.
#[no_mangle]
pub unsafe extern "C" fn qshim_request_poll(conn: *const ConnFlags) {
    control::request_poll(conn.as_ref());
}

/// Whether `conn`'s send path is flow- or stream-blocked. Null yields 0.
///
/// # Safety
///
/// `conn` must be null or a live handle, accessed under the engine's
/// serialization discipline.
#[no_mangle]
pub unsafe extern "C" fn qshim_is_flow_blocked(conn: *const ConnFlags) -> c_int {
    c_int::from(control::is_flow_blocked(conn.as_ref()))
}

/// Stop `conn` from negotiating or applying delayed acknowledgements.
/// Idempotent; null is a no-op.
///
/// # Safety
///
/// `conn` must be null or a live handle, accessed under the engine's
/// serialization discipline.
#[no_mangle]
pub unsafe extern "C" fn qshim_disable_ack_delay(conn: *const ConnFlags) {
    control::disable_ack_delay(conn.as_ref());
}

// =============================================================================
// Wall clock
// =============================================================================

/// Seconds and microseconds since the Unix epoch, C layout.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct QshimTimeval {
    pub tv_sec: i64,
    pub tv_usec: i64,
}

/// Timezone pair kept for signature compatibility; always zeroed.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct QshimTimezone {
    pub tz_minuteswest: c_int,
    pub tz_dsttime: c_int,
}

/// Fill `tv` with the current Unix-epoch wall clock and zero `tz`.
///
/// Either pointer may be null, in which case that side is skipped. Always
/// returns 0.
///
/// # Safety
///
/// Non-null pointers must be valid for writes of their respective types.
#[no_mangle]
pub unsafe extern "C" fn qshim_gettimeofday(
    tv: *mut QshimTimeval,
    tz: *mut QshimTimezone,
) -> c_int {
    if let Some(tv) = tv.as_mut() {
        let now = wall_clock_now();
        tv.tv_sec = now.secs;
        tv.tv_usec = now.micros;
    }
    if let Some(tz) = tz.as_mut() {
        tz.tz_minuteswest = 0;
        tz.tz_dsttime = 0;
    }
    0
}
