//! Microsecond wall-clock query.
//!
//! The rest of the stack expects Unix-epoch seconds plus microseconds. Unix
//! targets have that natively; Windows reports 100 ns ticks since 1601-01-01
//! and needs conversion. One entry point, one implementation per platform.

/// Wall-clock instant: seconds and microseconds since the Unix epoch.
///
/// `micros` is always in `[0, 1_000_000)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub secs: i64,
    pub micros: i64,
}

/// FILETIME value of the Unix epoch (100 ns ticks since 1601-01-01).
const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;

/// Ticks per second in FILETIME resolution.
const TICKS_PER_SEC: u64 = 10_000_000;

/// Ticks per microsecond in FILETIME resolution.
const TICKS_PER_MICRO: u64 = 10;

/// Convert a FILETIME tick count to a Unix-epoch wall clock.
///
/// Instants before the Unix epoch clamp to zero; the underlying platform
/// query never reports them.
pub fn filetime_to_wall_clock(ticks: u64) -> WallClock {
    let since_epoch = ticks.saturating_sub(FILETIME_UNIX_EPOCH);
    WallClock {
        secs: (since_epoch / TICKS_PER_SEC) as i64,
        micros: ((since_epoch % TICKS_PER_SEC) / TICKS_PER_MICRO) as i64,
    }
}

/// Query the current wall clock.
///
/// Failure is not modeled: the platform calls wrapped here succeed on every
/// supported target.
#[cfg(unix)]
pub fn wall_clock_now() -> WallClock {
    let mut tv = libc::timeval {
        tv_sec: 0,
        tv_usec: 0,
    };
    unsafe {
        libc::gettimeofday(&mut tv, std::ptr::null_mut());
    }
    WallClock {
        secs: tv.tv_sec as i64,
        micros: tv.tv_usec as i64,
    }
}

/// Query the current wall clock.
///
/// Failure is not modeled: the platform calls wrapped here succeed on every
/// supported target.
#[cfg(windows)]
pub fn wall_clock_now() -> WallClock {
    #[repr(C)]
    struct FileTime {
        low: u32,
        high: u32,
    }

    #[link(name = "kernel32")]
    extern "system" {
        fn GetSystemTimeAsFileTime(out: *mut FileTime);
    }

    let mut ft = FileTime { low: 0, high: 0 };
    unsafe {
        GetSystemTimeAsFileTime(&mut ft);
    }
    filetime_to_wall_clock(((ft.high as u64) << 32) | ft.low as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_epoch_maps_to_zero() {
        assert_eq!(
            filetime_to_wall_clock(FILETIME_UNIX_EPOCH),
            WallClock { secs: 0, micros: 0 }
        );
    }

    #[test]
    fn known_instant_converts() {
        // 2020-01-01T00:00:00Z = 1_577_836_800 Unix seconds.
        let ticks = FILETIME_UNIX_EPOCH + 1_577_836_800 * TICKS_PER_SEC;
        assert_eq!(
            filetime_to_wall_clock(ticks),
            WallClock {
                secs: 1_577_836_800,
                micros: 0
            }
        );
    }

    #[test]
    fn sub_second_ticks_become_micros() {
        // 123456.7 microseconds past the epoch second: the 0.7 is below
        // microsecond resolution and truncates.
        let ticks = FILETIME_UNIX_EPOCH + 1_234_567;
        assert_eq!(
            filetime_to_wall_clock(ticks),
            WallClock {
                secs: 0,
                micros: 123_456
            }
        );
    }

    #[test]
    fn micros_stay_in_range() {
        for offset in [0u64, 1, 9_999_999, 10_000_000, 123_456_789_012] {
            let wc = filetime_to_wall_clock(FILETIME_UNIX_EPOCH + offset);
            assert!((0..1_000_000).contains(&wc.micros), "offset {offset}");
        }
    }

    #[test]
    fn pre_epoch_clamps_to_zero() {
        assert_eq!(filetime_to_wall_clock(0), WallClock { secs: 0, micros: 0 });
    }

    #[test]
    fn now_is_sane() {
        let wc = wall_clock_now();
        // After 2020, micros in range.
        assert!(wc.secs > 1_577_836_800);
        assert!((0..1_000_000).contains(&wc.micros));
    }
}
