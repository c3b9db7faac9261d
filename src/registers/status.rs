//! Status registers and the chip status byte
//!
//! The status registers (0xF0 - 0xFD) are read only. They report the state
//! machine position, FIFO fill levels and signal quality of the last packet.
//! Each one is a typed register; its field layout comes from
//! [`crate::schema`] and is decoded through [`crate::bits`].

use core::convert::Infallible;

use bitflags::bitflags;
use regiface::{register, FromByteArray, ReadableRegister};

use crate::bits::{self, Field};
use crate::schema::{CRC_OK, LQI_EST, MARC_STATE, NUM_RXBYTES, NUM_TXBYTES, RXFIFO_OVERFLOW, TXFIFO_UNDERFLOW};

/// Reads a field whose position is fixed by the schema constants.
fn field(byte: u8, field: Field) -> u8 {
    // the schema constants are valid fields
    bits::extract(byte, field).unwrap_or(0)
}

/// Error type for invalid MARCSTATE values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidChipState(pub u8);

/// Main radio control state machine state
///
/// Reported by the MARC_STATE field of MARCSTATE. The chip moves between
/// these states on strobes and on its own; the driver only observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipState {
    Sleep = 0x00,
    Idle = 0x01,
    Xoff = 0x02,
    VcoonMc = 0x03,
    RegonMc = 0x04,
    Mancal = 0x05,
    Vcoon = 0x06,
    Regon = 0x07,
    Startcal = 0x08,
    Bwboost = 0x09,
    FsLock = 0x0A,
    Ifadcon = 0x0B,
    Endcal = 0x0C,
    Rx = 0x0D,
    RxEnd = 0x0E,
    RxRst = 0x0F,
    TxRxSwitch = 0x10,
    RxFifoOverflow = 0x11,
    Fstxon = 0x12,
    Tx = 0x13,
    TxEnd = 0x14,
    RxTxSwitch = 0x15,
    TxFifoUnderflow = 0x16,
}

impl TryFrom<u8> for ChipState {
    type Error = InvalidChipState;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ChipState::*;
        Ok(match value {
            0x00 => Sleep,
            0x01 => Idle,
            0x02 => Xoff,
            0x03 => VcoonMc,
            0x04 => RegonMc,
            0x05 => Mancal,
            0x06 => Vcoon,
            0x07 => Regon,
            0x08 => Startcal,
            0x09 => Bwboost,
            0x0A => FsLock,
            0x0B => Ifadcon,
            0x0C => Endcal,
            0x0D => Rx,
            0x0E => RxEnd,
            0x0F => RxRst,
            0x10 => TxRxSwitch,
            0x11 => RxFifoOverflow,
            0x12 => Fstxon,
            0x13 => Tx,
            0x14 => TxEnd,
            0x15 => RxTxSwitch,
            0x16 => TxFifoUnderflow,
            invalid => return Err(InvalidChipState(invalid)),
        })
    }
}

impl ChipState {
    /// True while a transmission is running or just finishing.
    pub fn is_transmitting(self) -> bool {
        matches!(self, ChipState::Tx | ChipState::TxEnd | ChipState::RxTxSwitch)
    }
}

/// Main radio control state register (address: 0xF5)
#[register(0xF5u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct MarcState {
    pub state: ChipState,
}

impl FromByteArray for MarcState {
    type Error = InvalidChipState;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            state: ChipState::try_from(field(bytes[0], MARC_STATE))?,
        })
    }
}

/// TX FIFO status register (address: 0xFA)
#[register(0xFAu8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct TxBytes {
    /// The TX FIFO ran empty while transmitting
    pub underflow: bool,
    /// Bytes waiting in the TX FIFO
    pub count: u8,
}

impl FromByteArray for TxBytes {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            underflow: field(bytes[0], TXFIFO_UNDERFLOW) != 0,
            count: field(bytes[0], NUM_TXBYTES),
        })
    }
}

/// RX FIFO status register (address: 0xFB)
#[register(0xFBu8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct RxBytes {
    /// The RX FIFO overflowed; its content is no longer reliable
    pub overflow: bool,
    /// Bytes waiting in the RX FIFO
    pub count: u8,
}

impl FromByteArray for RxBytes {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            overflow: field(bytes[0], RXFIFO_OVERFLOW) != 0,
            count: field(bytes[0], NUM_RXBYTES),
        })
    }
}

/// Part number register (address: 0xF0)
#[register(0xF0u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct PartNumber {
    pub value: u8,
}

impl FromByteArray for PartNumber {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

/// Chip version register (address: 0xF1)
#[register(0xF1u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct ChipVersion {
    pub value: u8,
}

impl FromByteArray for ChipVersion {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { value: bytes[0] })
    }
}

/// Received signal strength register (address: 0xF4)
///
/// The raw value is a two's complement number in half dB steps, offset by
/// a chip specific constant.
#[register(0xF4u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct Rssi {
    pub raw: u8,
}

impl Rssi {
    /// Signal strength in dBm given the chip's RSSI offset.
    pub fn dbm(&self, offset: i16) -> f32 {
        (self.raw as i8) as f32 / 2.0 - offset as f32
    }
}

impl FromByteArray for Rssi {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self { raw: bytes[0] })
    }
}

/// Link quality register (address: 0xF3)
#[register(0xF3u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct LinkQuality {
    /// CRC of the last received packet matched
    pub crc_ok: bool,
    /// Link quality estimate; lower is better
    pub estimate: u8,
}

impl FromByteArray for LinkQuality {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            crc_ok: field(bytes[0], CRC_OK) != 0,
            estimate: field(bytes[0], LQI_EST),
        })
    }
}

bitflags! {
    /// Current GDOx status and packet status flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PacketStatusFlags: u8 {
        /// Last CRC comparison matched
        const CRC_OK = 1 << 7;
        /// Carrier sense
        const CS = 1 << 6;
        /// Preamble quality reached
        const PQT_REACHED = 1 << 5;
        /// Channel is clear
        const CCA = 1 << 4;
        /// Start of frame delimiter: sync word received
        const SFD = 1 << 3;
        /// Current GDO2 value
        const GDO2 = 1 << 2;
        /// Current GDO0 value
        const GDO0 = 1;
    }
}

/// Packet status register (address: 0xF8)
#[register(0xF8u8)]
#[derive(Debug, Clone, Copy, ReadableRegister)]
pub struct PacketStatus {
    pub flags: PacketStatusFlags,
}

impl FromByteArray for PacketStatus {
    type Error = Infallible;
    type Array = [u8; 1];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            flags: PacketStatusFlags::from_bits_truncate(bytes[0]),
        })
    }
}

/// Coarse chip state carried in the status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusState {
    Idle = 0b000,
    Rx = 0b001,
    Tx = 0b010,
    Fstxon = 0b011,
    Calibrate = 0b100,
    Settling = 0b101,
    RxFifoOverflow = 0b110,
    TxFifoUnderflow = 0b111,
}

/// Status byte clocked out by the chip during every header byte
///
/// # Status Byte Format
/// - Bit 7: CHIP_RDYn, low once power and crystal are stable
/// - Bits 6:4: Coarse state
/// - Bits 3:0: Bytes available in the RX FIFO (reads) or free in the TX
///   FIFO (writes), saturating at 15
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusByte(pub u8);

impl StatusByte {
    /// True once the crystal is running and the chip accepts commands.
    pub fn chip_ready(self) -> bool {
        self.0 & 0x80 == 0
    }

    pub fn state(self) -> StatusState {
        match (self.0 >> 4) & 0x7 {
            0b000 => StatusState::Idle,
            0b001 => StatusState::Rx,
            0b010 => StatusState::Tx,
            0b011 => StatusState::Fstxon,
            0b100 => StatusState::Calibrate,
            0b101 => StatusState::Settling,
            0b110 => StatusState::RxFifoOverflow,
            _ => StatusState::TxFifoUnderflow,
        }
    }

    pub fn fifo_bytes(self) -> u8 {
        self.0 & 0x0F
    }
}
