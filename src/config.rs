//! Driver configuration
//!
//! Board level constants and the bounds on every busy-wait loop in the
//! engine. A loop that runs out of polls fails with [`crate::Error::Timeout`].
//! Every loop polls at least once, so a limit of 0 behaves like 1.

use crate::params::DEFAULT_OSC_HZ;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Crystal frequency in Hz
    pub osc_freq_hz: u32,
    /// MARCSTATE polls, 10 µs apart, waiting for IDLE after SIDLE
    pub idle_poll_limit: u32,
    /// MARCSTATE polls, 10 µs apart, waiting for the chip to accept a frame
    pub tx_ready_poll_limit: u32,
    /// TXBYTES polls, 100 µs apart, waiting for the TX FIFO to drain
    pub tx_drain_poll_limit: u32,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            osc_freq_hz: DEFAULT_OSC_HZ,
            idle_poll_limit: 1_000,
            tx_ready_poll_limit: 10_000,
            tx_drain_poll_limit: 10_000,
        }
    }

    pub const fn with_osc_freq(mut self, hz: u32) -> Self {
        self.osc_freq_hz = hz;
        self
    }

    pub const fn with_idle_poll_limit(mut self, polls: u32) -> Self {
        self.idle_poll_limit = polls;
        self
    }

    pub const fn with_tx_ready_poll_limit(mut self, polls: u32) -> Self {
        self.tx_ready_poll_limit = polls;
        self
    }

    pub const fn with_tx_drain_poll_limit(mut self, polls: u32) -> Self {
        self.tx_drain_poll_limit = polls;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
