//! Radio parameter encodings
//!
//! Conversions between physical units and the register encodings used by
//! the CC1101. Everything here is integer arithmetic on the crystal
//! frequency `fosc`, so it runs without a floating point unit.
//!
//! See section 12 (data rate), 13 (receiver bandwidth), 16 (modulation) and
//! 21 (frequency programming) of the datasheet.

use core::fmt;

/// Crystal frequency fitted on most CC1101 modules
pub const DEFAULT_OSC_HZ: u32 = 26_000_000;

/// Carrier frequencies accepted by [`crate::Cc1101::set_base_frequency`], in MHz
pub const CARRIERS_MHZ: [u16; 4] = [315, 433, 868, 915];

/// Modulation format (MDMCFG2.MOD_FORMAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Modulation {
    TwoFsk = 0b000,
    Gfsk = 0b001,
    /// ASK / OOK share one encoding
    AskOok = 0b011,
    FourFsk = 0b100,
    Msk = 0b111,
}

impl Modulation {
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b000 => Some(Self::TwoFsk),
            0b001 => Some(Self::Gfsk),
            0b011 => Some(Self::AskOok),
            0b100 => Some(Self::FourFsk),
            0b111 => Some(Self::Msk),
            _ => None,
        }
    }

    /// Parses the usual names: `2-FSK`, `GFSK`, `ASK`, `OOK`, `4-FSK`, `MSK`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "2-FSK" => Some(Self::TwoFsk),
            "GFSK" => Some(Self::Gfsk),
            "ASK" | "OOK" => Some(Self::AskOok),
            "4-FSK" => Some(Self::FourFsk),
            "MSK" => Some(Self::Msk),
            _ => None,
        }
    }
}

/// Packet length configuration (PKTCTRL0.LENGTH_CONFIG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketLengthMode {
    /// Length set by PKTLEN
    Fixed = 0b00,
    /// Length carried in the first byte after the sync word
    Variable = 0b01,
    /// No length limit. Not supported by this driver.
    Infinite = 0b10,
}

impl PacketLengthMode {
    pub fn bits(self) -> u8 {
        self as u8
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b00 => Some(Self::Fixed),
            0b01 => Some(Self::Variable),
            0b10 => Some(Self::Infinite),
            _ => None,
        }
    }
}

/// Receive filter bandwidths with their (CHANBW_E, CHANBW_M) encodings
///
/// Nominal values for a 26 MHz crystal.
pub const RX_BANDWIDTHS: [(u32, u8, u8); 6] = [
    (58_000, 3, 3),
    (100_000, 3, 0),
    (232_000, 1, 3),
    (325_000, 1, 1),
    (540_000, 0, 2),
    (812_000, 0, 0),
];

/// Looks up the (CHANBW_E, CHANBW_M) pair for one of [`RX_BANDWIDTHS`].
pub fn rx_bandwidth_setting(hz: u32) -> Option<(u8, u8)> {
    RX_BANDWIDTHS
        .iter()
        .find(|(bw, _, _)| *bw == hz)
        .map(|&(_, e, m)| (e, m))
}

/// Receive filter bandwidth in Hz: `fosc / (8 * (4 + M) * 2^E)`.
pub fn rx_bandwidth_hz(fosc: u32, chanbw_e: u8, chanbw_m: u8) -> u32 {
    fosc / ((8 * (4 + chanbw_m as u32)) << chanbw_e)
}

/// Frequency control word for `hz`: `round(2^16 * hz / fosc)`.
pub fn frequency_word(hz: u64, fosc: u32) -> u32 {
    let fosc = fosc as u64;
    (((hz << 16) + fosc / 2) / fosc) as u32
}

/// Carrier frequency in Hz for a frequency word and channel setting:
/// `fosc / 2^16 * (FREQ + CHAN * (256 + CHANSPC_M) * 2^(CHANSPC_E - 2))`.
pub fn carrier_hz(fosc: u32, word: u32, channel: u8, chanspc_m: u8, chanspc_e: u8) -> u64 {
    // scaled by 4 so the 2^(E - 2) term stays integral
    let steps = ((word as u64) << 2)
        + ((channel as u64 * (256 + chanspc_m as u64)) << chanspc_e);
    (fosc as u64 * steps + (1 << 17)) >> 18
}

/// Channel spacing in Hz: `fosc / 2^18 * (256 + CHANSPC_M) * 2^CHANSPC_E`.
pub fn channel_spacing_hz(fosc: u32, chanspc_m: u8, chanspc_e: u8) -> u32 {
    ((fosc as u64 * (256 + chanspc_m as u64)) << chanspc_e >> 18) as u32
}

/// (DRATE_E, DRATE_M) for a data rate in baud.
///
/// `DRATE_E = floor(log2(rate * 2^20 / fosc))` and
/// `DRATE_M = round(rate * 2^28 / (fosc * 2^DRATE_E)) - 256`, with a mantissa
/// of 256 carried into the exponent. `None` when the exponent does not fit
/// in four bits.
pub fn data_rate_setting(baud: u32, fosc: u32) -> Option<(u8, u8)> {
    let (baud, fosc) = (baud as u64, fosc as u64);

    let scaled = (baud << 20) / fosc;
    if scaled == 0 {
        return None;
    }
    let mut exponent = 63 - scaled.leading_zeros();
    if exponent > 15 {
        return None;
    }

    let mantissa = ((baud << (28 - exponent)) + fosc / 2) / fosc;
    let mut mantissa = mantissa.saturating_sub(256);
    if mantissa >= 256 {
        mantissa = 0;
        exponent += 1;
        if exponent > 15 {
            return None;
        }
    }

    Some((exponent as u8, mantissa as u8))
}

/// Data rate in baud: `(256 + DRATE_M) * 2^DRATE_E / 2^28 * fosc`.
pub fn data_rate_baud(fosc: u32, drate_e: u8, drate_m: u8) -> u32 {
    (((256 + drate_m as u64) * fosc as u64) << drate_e >> 28) as u32
}

/// Error type for sync word text that is not four hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidSyncWord;

/// 16 bit sync word (SYNC1:SYNC0)
///
/// Formats as four uppercase hex digits, e.g. `D391`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncWord(pub u16);

impl SyncWord {
    pub fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn low(self) -> u8 {
        self.0 as u8
    }
}

impl From<u16> for SyncWord {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for SyncWord {
    type Error = InvalidSyncWord;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidSyncWord);
        }
        u16::from_str_radix(text, 16)
            .map(Self)
            .map_err(|_| InvalidSyncWord)
    }
}

impl fmt::Display for SyncWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}
