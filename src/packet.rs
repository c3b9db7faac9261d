//! Packet framing
//!
//! Builds the bytes written to the TX FIFO for a payload, and holds
//! packets read back from the RX FIFO. Neither touches the bus.
//!
//! # Frame Layout
//! - Fixed length: `[address?] payload [zero padding up to PKTLEN]`
//! - Variable length: `length [address?] payload`, where `length` counts the
//!   address byte and the payload
//!
//! The address byte is only sent when APPEND_STATUS is set.

use core::ops::Deref;

use crate::params::PacketLengthMode;
use crate::Error;

/// Longest frame the FIFO path handles: a length byte and 255 bytes after it
pub const MAX_FRAME_LEN: usize = 256;

/// Longest packet the receive path returns
pub const MAX_PACKET_LEN: usize = 255;

/// Frame ready to be written to the TX FIFO
#[derive(Clone)]
pub struct TxFrame {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl TxFrame {
    /// Frames `payload` for the given length mode.
    ///
    /// # Arguments
    /// * `mode` - Packet length configuration of the chip
    /// * `payload` - Bytes to send
    /// * `address` - Device address to send ahead of the payload, if any
    /// * `packet_length` - Content of PKTLEN
    ///
    /// # Errors
    /// * `Error::EmptyPayload` - `payload` is empty
    /// * `Error::PayloadTooLarge` - payload and address exceed PKTLEN (fixed)
    ///   or the 255 byte length field (variable)
    /// * `Error::NotImplemented` - infinite length mode
    pub fn build<E>(
        mode: PacketLengthMode,
        payload: &[u8],
        address: Option<u8>,
        packet_length: u8,
    ) -> Result<Self, Error<E>> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        let body_len = payload.len() + address.is_some() as usize;

        let mut frame = Self {
            buf: [0; MAX_FRAME_LEN],
            len: 0,
        };
        match mode {
            PacketLengthMode::Fixed => {
                if body_len > packet_length as usize {
                    return Err(Error::PayloadTooLarge);
                }
                frame.extend(address, payload);
                frame.len = packet_length as usize;
            }
            PacketLengthMode::Variable => {
                if body_len > MAX_PACKET_LEN {
                    return Err(Error::PayloadTooLarge);
                }
                frame.buf[0] = body_len as u8;
                frame.len = 1;
                frame.extend(address, payload);
            }
            PacketLengthMode::Infinite => return Err(Error::NotImplemented),
        }

        Ok(frame)
    }

    fn extend(&mut self, address: Option<u8>, payload: &[u8]) {
        if let Some(address) = address {
            self.buf[self.len] = address;
            self.len += 1;
        }
        self.buf[self.len..self.len + payload.len()].copy_from_slice(payload);
        self.len += payload.len();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// Packet read from the RX FIFO
#[derive(Clone)]
pub struct RxPacket {
    buf: [u8; MAX_PACKET_LEN],
    len: usize,
}

impl RxPacket {
    /// Zeroed packet of `len` bytes.
    pub(crate) fn zeroed(len: u8) -> Self {
        Self {
            buf: [0; MAX_PACKET_LEN],
            len: len as usize,
        }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Deref for RxPacket {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl core::fmt::Debug for RxPacket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("RxPacket").field(&self.as_slice()).finish()
    }
}

impl PartialEq for RxPacket {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for RxPacket {}

#[cfg(feature = "defmt")]
impl defmt::Format for RxPacket {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RxPacket({=[u8]:x})", self.as_slice())
    }
}

/// Outcome of a receive attempt
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reception {
    /// RX FIFO empty or overflowed
    Empty,
    /// A complete packet
    Packet(RxPacket),
    /// Variable length packet announcing more bytes than PKTLEN allows.
    /// Carries the announced length; the FIFO is left as is.
    Oversized(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(
        mode: PacketLengthMode,
        payload: &[u8],
        address: Option<u8>,
        packet_length: u8,
    ) -> Result<TxFrame, Error<()>> {
        TxFrame::build(mode, payload, address, packet_length)
    }

    #[test]
    fn variable_frame_leads_with_length() {
        let frame = build(PacketLengthMode::Variable, &[0x41, 0x42], None, 0xFF).unwrap();
        assert_eq!(frame.as_bytes(), &[0x02, 0x41, 0x42]);
    }

    #[test]
    fn variable_frame_counts_address() {
        let frame = build(PacketLengthMode::Variable, &[0x41, 0x42], Some(0x05), 0xFF).unwrap();
        assert_eq!(frame.as_bytes(), &[0x03, 0x05, 0x41, 0x42]);
    }

    #[test]
    fn variable_frame_ignores_pktlen() {
        // PKTLEN only bounds reception in variable mode
        let frame = build(PacketLengthMode::Variable, &[1, 2, 3, 4], None, 2).unwrap();
        assert_eq!(frame.as_bytes().len(), 5);
    }

    #[test]
    fn variable_frame_limit() {
        let payload = [0xAA; 255];
        assert!(build(PacketLengthMode::Variable, &payload, None, 0xFF).is_ok());
        assert_eq!(
            build(PacketLengthMode::Variable, &payload, Some(1), 0xFF).err(),
            Some(Error::PayloadTooLarge)
        );
    }

    #[test]
    fn fixed_frame_is_padded() {
        let frame = build(PacketLengthMode::Fixed, &[0x41, 0x42], None, 5).unwrap();
        assert_eq!(frame.as_bytes(), &[0x41, 0x42, 0x00, 0x00, 0x00]);

        let frame = build(PacketLengthMode::Fixed, &[0x41], Some(0x07), 3).unwrap();
        assert_eq!(frame.as_bytes(), &[0x07, 0x41, 0x00]);
    }

    #[test]
    fn fixed_frame_too_large() {
        assert_eq!(
            build(PacketLengthMode::Fixed, &[1, 2, 3], None, 2).err(),
            Some(Error::PayloadTooLarge)
        );
        // the address byte counts against PKTLEN
        assert_eq!(
            build(PacketLengthMode::Fixed, &[1, 2], Some(9), 2).err(),
            Some(Error::PayloadTooLarge)
        );
    }

    #[test]
    fn rejected_frames() {
        assert_eq!(
            build(PacketLengthMode::Variable, &[], None, 0xFF).err(),
            Some(Error::EmptyPayload)
        );
        assert_eq!(
            build(PacketLengthMode::Infinite, &[1], None, 0xFF).err(),
            Some(Error::NotImplemented)
        );
    }

    #[test]
    fn rx_packet_views() {
        let mut packet = RxPacket::zeroed(3);
        packet.as_mut_slice().copy_from_slice(&[7, 8, 9]);
        assert_eq!(&*packet, &[7, 8, 9]);
        assert_eq!(packet.len(), 3);
    }
}
