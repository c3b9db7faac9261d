//! Whole-byte configuration registers
//!
//! Registers whose single field spans all eight bits are exposed as typed
//! registers. Multi-field configuration registers are reached by name
//! through the schema instead (see [`crate::Cc1101::set_register_field`]).

use core::convert::Infallible;

use regiface::{register, FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

/// Packet length register (address: 0x06)
///
/// In fixed length mode this is the exact packet length. In variable length
/// mode it is the largest length byte accepted on receive.
#[register(0x06u8)]
#[derive(Debug, Clone, Copy, ReadableRegister, WritableRegister)]
pub struct PacketLength {
    /// Default: 0xFF
    pub value: u8,
}

impl Default for PacketLength {
    fn default() -> Self {
        Self { value: 0xFF }
    }
}

/// Device address register (address: 0x09)
///
/// Used for packet filtering, and sent ahead of the payload when
/// APPEND_STATUS is enabled.
#[register(0x09u8)]
#[derive(Debug, Clone, Copy, ReadableRegister, WritableRegister, Default)]
pub struct DeviceAddress {
    pub value: u8,
}

/// Channel number register (address: 0x0A)
///
/// Multiplied by the channel spacing and added to the base frequency.
#[register(0x0Au8)]
#[derive(Debug, Clone, Copy, ReadableRegister, WritableRegister, Default)]
pub struct ChannelNumber {
    pub value: u8,
}

macro_rules! byte_register {
    ($($ty:ident),+) => {
        $(
            impl FromByteArray for $ty {
                type Error = Infallible;
                type Array = [u8; 1];

                fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
                    Ok(Self { value: bytes[0] })
                }
            }

            impl ToByteArray for $ty {
                type Error = Infallible;
                type Array = [u8; 1];

                fn to_bytes(self) -> Result<Self::Array, Self::Error> {
                    Ok([self.value])
                }
            }
        )+
    };
}

byte_register!(PacketLength, DeviceAddress, ChannelNumber);
