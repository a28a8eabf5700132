//! Library-agnostic transport tuning.
//!
//! `TransportTuning` captures the engine knobs this stack cares about in a
//! backend-neutral form. Engine drivers compile it to their own config type
//! at setup; the only knob applied through the control seam itself is the
//! ack-delay switch (see [`TransportTuning::apply_to`]).

use std::time::Duration;

use crate::error::{Error, Result};
use crate::transport::{control, EngineConnection};

/// Default congestion control algorithm.
pub const DEFAULT_CONGESTION_CONTROL: CongestionControl = CongestionControl::Cubic;

/// Congestion control algorithms the engine can be asked for, by the names
/// it registers them under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CongestionControl {
    NewReno,
    Cubic,
    Dcubic,
    Fast,
    Bbr,
    Prague,
}

impl CongestionControl {
    /// Parse an algorithm from its engine name.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "reno" | "newreno" => Ok(Self::NewReno),
            "cubic" => Ok(Self::Cubic),
            "dcubic" => Ok(Self::Dcubic),
            "fast" => Ok(Self::Fast),
            "bbr" => Ok(Self::Bbr),
            "prague" => Ok(Self::Prague),
            other => Err(Error::Tuning {
                message: format!("unknown congestion control algorithm: {other}"),
            }),
        }
    }

    /// The name the engine registers this algorithm under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewReno => "newreno",
            Self::Cubic => "cubic",
            Self::Dcubic => "dcubic",
            Self::Fast => "fast",
            Self::Bbr => "bbr",
            Self::Prague => "prague",
        }
    }
}

/// Validated transport tuning, ready for a driver to compile into its
/// backend's config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportTuning {
    congestion_control: CongestionControl,
    keep_alive_interval: Option<Duration>,
    gso: bool,
    disable_ack_delay: bool,
    debug_poll: bool,
    debug_streams: bool,
}

impl TransportTuning {
    /// Start building a tuning set from the defaults.
    pub fn builder() -> TuningBuilder {
        TuningBuilder::new()
    }

    pub fn congestion_control(&self) -> CongestionControl {
        self.congestion_control
    }

    pub fn keep_alive_interval(&self) -> Option<Duration> {
        self.keep_alive_interval
    }

    /// Whether to use generic segmentation offload on the UDP path.
    pub fn gso(&self) -> bool {
        self.gso
    }

    pub fn disable_ack_delay(&self) -> bool {
        self.disable_ack_delay
    }

    /// Extra per-poll logging in the driver loop.
    pub fn debug_poll(&self) -> bool {
        self.debug_poll
    }

    /// Extra per-stream logging in the driver loop.
    pub fn debug_streams(&self) -> bool {
        self.debug_streams
    }

    /// Apply the seam-level knobs to a connection.
    ///
    /// Only the ack-delay switch travels through the control seam; the rest
    /// of the tuning is consumed when the driver builds its backend config.
    pub fn apply_to<C: EngineConnection>(&self, conn: &C) {
        if self.disable_ack_delay {
            control::disable_ack_delay(Some(conn));
        }
    }
}

impl Default for TransportTuning {
    fn default() -> Self {
        Self {
            congestion_control: DEFAULT_CONGESTION_CONTROL,
            keep_alive_interval: None,
            gso: true,
            disable_ack_delay: false,
            debug_poll: false,
            debug_streams: false,
        }
    }
}

/// Builder for [`TransportTuning`].
#[derive(Debug, Clone)]
pub struct TuningBuilder {
    congestion_control: CongestionControl,
    keep_alive_interval: Option<Duration>,
    gso: bool,
    disable_ack_delay: bool,
    debug_poll: bool,
    debug_streams: bool,
}

impl Default for TuningBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningBuilder {
    pub fn new() -> Self {
        Self {
            congestion_control: DEFAULT_CONGESTION_CONTROL,
            keep_alive_interval: None,
            gso: true,
            disable_ack_delay: false,
            debug_poll: false,
            debug_streams: false,
        }
    }

    pub fn congestion_control(mut self, algorithm: CongestionControl) -> Self {
        self.congestion_control = algorithm;
        self
    }

    pub fn keep_alive_interval(mut self, interval: Duration) -> Self {
        self.keep_alive_interval = Some(interval);
        self
    }

    pub fn gso(mut self, enabled: bool) -> Self {
        self.gso = enabled;
        self
    }

    pub fn disable_ack_delay(mut self, disabled: bool) -> Self {
        self.disable_ack_delay = disabled;
        self
    }

    pub fn debug_poll(mut self, enabled: bool) -> Self {
        self.debug_poll = enabled;
        self
    }

    pub fn debug_streams(mut self, enabled: bool) -> Self {
        self.debug_streams = enabled;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<TransportTuning> {
        if self.keep_alive_interval == Some(Duration::ZERO) {
            return Err(Error::Tuning {
                message: "keep-alive interval must be non-zero".into(),
            });
        }
        Ok(TransportTuning {
            congestion_control: self.congestion_control,
            keep_alive_interval: self.keep_alive_interval,
            gso: self.gso,
            disable_ack_delay: self.disable_ack_delay,
            debug_poll: self.debug_poll,
            debug_streams: self.debug_streams,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ConnFlags;

    #[test]
    fn parse_known_algorithms() {
        assert_eq!(CongestionControl::parse("cubic").unwrap(), CongestionControl::Cubic);
        assert_eq!(CongestionControl::parse("reno").unwrap(), CongestionControl::NewReno);
        assert_eq!(
            CongestionControl::parse("newreno").unwrap(),
            CongestionControl::NewReno
        );
        assert_eq!(CongestionControl::parse("bbr").unwrap(), CongestionControl::Bbr);
    }

    #[test]
    fn parse_unknown_algorithm_fails() {
        let err = CongestionControl::parse("reno2").unwrap_err();
        assert!(matches!(err, Error::Tuning { .. }));
    }

    #[test]
    fn name_round_trips() {
        for algo in [
            CongestionControl::NewReno,
            CongestionControl::Cubic,
            CongestionControl::Dcubic,
            CongestionControl::Fast,
            CongestionControl::Bbr,
            CongestionControl::Prague,
        ] {
            assert_eq!(CongestionControl::parse(algo.name()).unwrap(), algo);
        }
    }

    #[test]
    fn defaults() {
        let tuning = TransportTuning::default();
        assert_eq!(tuning.congestion_control(), CongestionControl::Cubic);
        assert_eq!(tuning.keep_alive_interval(), None);
        assert!(tuning.gso());
        assert!(!tuning.disable_ack_delay());
        assert!(!tuning.debug_poll());
        assert!(!tuning.debug_streams());
    }

    #[test]
    fn zero_keep_alive_rejected() {
        let err = TransportTuning::builder()
            .keep_alive_interval(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Tuning { .. }));
    }

    #[test]
    fn apply_honors_ack_delay_choice() {
        let conn = ConnFlags::new();
        TransportTuning::default().apply_to(&conn);
        assert!(!conn.ack_delay_disabled());

        let tuning = TransportTuning::builder()
            .disable_ack_delay(true)
            .build()
            .unwrap();
        tuning.apply_to(&conn);
        assert!(conn.ack_delay_disabled());
        // Applying twice is the same as once.
        tuning.apply_to(&conn);
        assert!(conn.ack_delay_disabled());
    }
}
