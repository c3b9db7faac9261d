//! CC1101 Register Access
//!
//! This module frames register, FIFO and strobe accesses for the CC1101 on
//! top of an `embedded-hal` SPI device.
//!
//! Every access starts with a header byte holding the access mode in bits
//! 7:6 and the target address in the rest (see [`crate::address`]). While the
//! header is clocked in, the chip clocks out its [`StatusByte`].
//!
//! The interface is built around the `Device<SPI>` struct which wraps an SPI
//! device and provides methods for:
//! - Reading and writing single registers
//! - Burst reads and writes (FIFOs, PATABLE)
//! - Issuing command strobes
//! - Reading and writing typed registers from [`crate::registers`]
//!
//! # Example
//! ```no_run
//! use cc1101::{Device, Register, Strobe};
//! # fn demo<SPI: embedded_hal::spi::SpiDevice>(spi: SPI) -> Result<(), cc1101::Error<SPI::Error>> {
//! let mut device = Device::new(spi);
//!
//! device.strobe(Strobe::Sidle)?;
//! let pktlen = device.read_byte(Register::Pktlen)?;
//! device.write_byte("CHANNR", 0x02)?;
//! # Ok(()) }
//! ```

use core::convert::Infallible;

use embedded_hal::spi::Operation;
use regiface::{FromByteArray, ReadableRegister, ToByteArray, WritableRegister};

use crate::address::{Address, READ_BURST, READ_SINGLE, WRITE_BURST, WRITE_SINGLE};
use crate::registers::StatusByte;
use crate::Error;

/// Longest burst read, in data bytes
pub const MAX_BURST_LEN: usize = 255;

/// Register level interface to the CC1101
pub struct Device<SPI> {
    spi: SPI,
}

impl<SPI> Device<SPI> {
    /// Creates a new Device instance wrapping the provided SPI device.
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Device<SPI>
where
    SPI: embedded_hal::spi::SpiDevice,
{
    /// Reads one byte from a register.
    ///
    /// Sends `[READ_SINGLE | addr, 0x00]` and returns the second byte
    /// clocked out by the chip.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    /// * `Error::InvalidAddress` / `Error::Schema` - address did not resolve
    pub fn read_byte<'a>(&mut self, addr: impl Into<Address<'a>>) -> Result<u8, Error<SPI::Error>> {
        let addr = addr.into().resolve::<SPI::Error>()?;
        let mut frame = [READ_SINGLE | addr, 0x00];

        self.spi.transfer_in_place(&mut frame).map_err(Error::Bus)?;
        trace!("read {=u8:#x} -> {=u8:#x}", addr, frame[1]);
        Ok(frame[1])
    }

    /// Writes one byte to a register.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    /// * `Error::InvalidAddress` / `Error::Schema` - address did not resolve
    pub fn write_byte<'a>(
        &mut self,
        addr: impl Into<Address<'a>>,
        value: u8,
    ) -> Result<(), Error<SPI::Error>> {
        let addr = addr.into().resolve::<SPI::Error>()?;
        trace!("write {=u8:#x} <- {=u8:#x}", addr, value);

        self.spi
            .write(&[WRITE_SINGLE | addr, value])
            .map_err(Error::Bus)
    }

    /// Burst reads `buf.len()` bytes starting at `addr`.
    ///
    /// The CC1101 is clocked with one header byte per data byte, each one
    /// advancing the address by 8: byte `i` of the transfer is
    /// `(addr + 8 * i) | READ_BURST`. The first response byte is the status
    /// byte and is dropped.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    /// * `Error::InvalidLength` - more than [`MAX_BURST_LEN`] bytes requested
    pub fn read_burst<'a>(
        &mut self,
        addr: impl Into<Address<'a>>,
        buf: &mut [u8],
    ) -> Result<(), Error<SPI::Error>> {
        let addr = addr.into().resolve::<SPI::Error>()?;
        if buf.len() > MAX_BURST_LEN {
            return Err(Error::InvalidLength);
        }

        let mut raw = [0u8; MAX_BURST_LEN + 1];
        let frame = &mut raw[..=buf.len()];
        for (i, byte) in frame.iter_mut().enumerate() {
            *byte = addr.wrapping_add((i as u8).wrapping_mul(8)) | READ_BURST;
        }

        self.spi.transfer_in_place(frame).map_err(Error::Bus)?;
        buf.copy_from_slice(&frame[1..]);
        trace!("burst read {=u8:#x}: {=[u8]:x}", addr, buf);
        Ok(())
    }

    /// Burst writes `data` starting at `addr` in a single transaction.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    pub fn write_burst<'a>(
        &mut self,
        addr: impl Into<Address<'a>>,
        data: &[u8],
    ) -> Result<(), Error<SPI::Error>> {
        let addr = addr.into().resolve::<SPI::Error>()?;
        trace!("burst write {=u8:#x}: {=[u8]:x}", addr, data);

        self.spi
            .transaction(&mut [
                Operation::Write(&[WRITE_BURST | addr]),
                Operation::Write(data),
            ])
            .map_err(Error::Bus)
    }

    /// Issues a command strobe.
    ///
    /// Sends `[addr, 0x00]` and returns the status byte clocked out with the
    /// header.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    pub fn strobe<'a>(&mut self, addr: impl Into<Address<'a>>) -> Result<StatusByte, Error<SPI::Error>> {
        let addr = addr.into().resolve::<SPI::Error>()?;
        let mut frame = [addr, 0x00];

        self.spi.transfer_in_place(&mut frame).map_err(Error::Bus)?;
        trace!("strobe {=u8:#x} status {=u8:#x}", addr, frame[0]);
        Ok(StatusByte(frame[0]))
    }

    /// Reads a typed register.
    ///
    /// # Type Parameters
    /// * `R` - Single byte register type with a u8 address
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    /// * `Error::UnrecognizedValue` - the register content did not decode
    pub fn read_register<R>(&mut self) -> Result<R, Error<SPI::Error>>
    where
        R: ReadableRegister<IdType = u8> + FromByteArray<Array = [u8; 1]>,
    {
        let raw = self.read_byte(R::id())?;
        R::from_bytes([raw]).map_err(|_| Error::UnrecognizedValue(raw))
    }

    /// Writes a typed register.
    ///
    /// # Errors
    /// * `Error::Bus` - SPI communication failed
    pub fn write_register<R>(&mut self, register: R) -> Result<(), Error<SPI::Error>>
    where
        R: WritableRegister<IdType = u8> + ToByteArray<Error = Infallible, Array = [u8; 1]>,
    {
        let [raw] = match register.to_bytes() {
            Ok(bytes) => bytes,
            Err(never) => match never {},
        };
        self.write_byte(R::id(), raw)
    }
}
