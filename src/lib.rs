#![cfg_attr(not(test), no_std)]
//! CC1101 Radio Driver
//!
//! This crate provides a driver for the Texas Instruments CC1101, a low cost
//! sub-GHz transceiver for the 315, 433, 868 and 915 MHz ISM bands, over any
//! `embedded-hal` 1.0 SPI device.
//!
//! # Features
//! - Modulation: 2-FSK, GFSK, 4-FSK, ASK/OOK and MSK
//! - Data rate: 0.6 to 500 kBaud
//! - 64 byte TX and RX FIFOs
//! - Fixed and variable length packets with optional address byte
//! - No allocation; `no_std`
//!
//! # Architecture
//! The driver is organized in layers:
//!
//! - [`bits`]: Encoding and decoding of bit fields inside a register byte
//!   - Fields are indexed MSB first: index 0 is bit 7
//!
//! - [`schema`]: Field layout of every register, as plain data
//!   - [`schema::CC1101`] describes the CC1101; other family members can be
//!     supported with another table
//!
//! - [`device`]: Register access over SPI
//!   - Single and burst reads/writes, command strobes
//!   - Typed access to the registers in [`registers`]
//!
//! - [`radio`]: The [`Cc1101`] engine
//!   - Chip state transitions and derived radio parameters
//!   - Packet transmit and receive
//!
//! # Usage
//! [`Cc1101`] owns an SPI device and a delay provider. Configuration is done
//! through query/command pairs; each command returns the value read back
//! from the chip.
//!
//! 1. Create a [`Cc1101`] with your SPI device and delay
//! 2. Reset the chip and check its identity
//! 3. Set carrier, modulation, data rate and packet format
//! 4. Send with [`Cc1101::send_data`], poll with [`Cc1101::recv_data`]
//!
//! # Important Notes
//! - The carrier can only be changed in IDLE; the setter takes care of it
//! - Infinite packet length mode is not supported
//! - Status registers (0xF0 - 0xFD) are read with the burst bit set;
//!   [`Register`] hides this
//!
//! # Example
//! ```no_run
//! use cc1101::{Cc1101, Error, Modulation, PacketLengthMode, Reception, SyncWord};
//! use embedded_hal::{delay::DelayNs, spi::SpiDevice};
//!
//! fn ping<SPI: SpiDevice, D: DelayNs>(spi: SPI, delay: D) -> Result<(), Error<SPI::Error>> {
//!     let mut radio = Cc1101::new(spi, delay);
//!
//!     radio.reset()?;
//!     radio.sanity_check()?;
//!     radio.set_base_frequency(433)?;
//!     radio.set_modulation(Modulation::Gfsk)?;
//!     radio.set_baud_rate(4800)?;
//!     radio.set_packet_length_mode(PacketLengthMode::Variable)?;
//!     radio.set_sync_word(SyncWord::try_from("D391")?)?;
//!
//!     radio.send_data(b"ping")?;
//!     if let Reception::Packet(packet) = radio.recv_data()? {
//!         assert_eq!(&packet[..], b"pong");
//!     }
//!     Ok(())
//! }
//! ```

#[macro_use]
mod fmt;

pub mod address;
pub mod bits;
pub mod config;
pub mod device;
pub mod error;
pub mod packet;
pub mod params;
pub mod radio;
pub mod registers;
pub mod schema;

pub use address::{Address, Fifo, Register, Strobe};
pub use config::Config;
pub use device::Device;
pub use error::Error;
pub use packet::{Reception, RxPacket, TxFrame};
pub use params::{Modulation, PacketLengthMode, SyncWord};
pub use radio::Cc1101;
pub use registers::*;
pub use schema::{ChipIdentity, RegisterSchema, RegisterSnapshot};
