//! Radio control
//!
//! [`Cc1101`] drives the chip through its command strobes and registers:
//! state transitions, the derived radio parameters (carrier, modulation,
//! data rate, ...) and packet transmit/receive over the FIFOs.
//!
//! Every parameter has a query and a command. A command validates its
//! argument, writes the registers, then reads them back and returns what the
//! chip now holds.
//!
//! Waits are blocking [`DelayNs`] calls. Each polling loop is bounded by a
//! limit from [`Config`] and fails with [`Error::Timeout`] when it runs out.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use crate::address::{Fifo, Register, Strobe};
use crate::bits::{self, FieldValue};
use crate::config::Config;
use crate::device::Device;
use crate::packet::{Reception, RxPacket, TxFrame};
use crate::params::{self, Modulation, PacketLengthMode, SyncWord, CARRIERS_MHZ};
use crate::registers::{
    ChannelNumber, ChipState, ChipVersion, DeviceAddress, LinkQuality, MarcState, PacketLength,
    PacketStatus, PacketStatusFlags, PartNumber, Rssi, RxBytes, StatusByte, TxBytes,
};
use crate::schema::{ChipIdentity, RegisterSchema, RegisterSnapshot};
use crate::Error;

/// Settling time after state change strobes
const STROBE_SETTLE_US: u32 = 2;
/// Interval between MARCSTATE polls
const STATE_POLL_US: u32 = 10;
/// Interval between TXBYTES polls
const DRAIN_POLL_US: u32 = 100;
/// Wait between filling the TX FIFO and starting transmission
const TX_FILL_WAIT_US: u32 = 2_000;

/// CC1101 radio
///
/// Owns the SPI device and a delay provider. The register layouts and chip
/// constants come from a [`RegisterSchema`]; board constants and polling
/// bounds from a [`Config`].
pub struct Cc1101<SPI, D> {
    device: Device<SPI>,
    delay: D,
    schema: RegisterSchema,
    config: Config,
}

impl<SPI, D> Cc1101<SPI, D> {
    /// Creates a radio with the CC1101 schema and the default configuration.
    pub fn new(spi: SPI, delay: D) -> Self {
        Self::with_config(spi, delay, RegisterSchema::default(), Config::default())
    }

    /// Creates a radio with a custom schema and configuration.
    ///
    /// # Arguments
    /// * `schema` - Register layouts and chip constants
    /// * `config` - Crystal frequency and polling bounds
    pub fn with_config(spi: SPI, delay: D, schema: RegisterSchema, config: Config) -> Self {
        Self {
            device: Device::new(spi),
            delay,
            schema,
            config,
        }
    }

    /// Releases the SPI device and the delay provider.
    pub fn release(self) -> (SPI, D) {
        (self.device.release(), self.delay)
    }

    /// Register level access to the chip.
    pub fn device(&mut self) -> &mut Device<SPI> {
        &mut self.device
    }

    /// Register schema in use.
    pub fn schema(&self) -> &RegisterSchema {
        &self.schema
    }

    /// Driver configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// RSSI offset of the chip in dB.
    pub fn rssi_offset(&self) -> i16 {
        self.schema.rssi_offset()
    }
}

impl<SPI, D> Cc1101<SPI, D>
where
    SPI: SpiDevice,
    D: DelayNs,
{
    fn strobe_and_settle(&mut self, strobe: Strobe) -> Result<(), Error<SPI::Error>> {
        self.device.strobe(strobe)?;
        self.delay.delay_us(STROBE_SETTLE_US);
        Ok(())
    }

    /// Calls `done` until it returns true, at most `limit` times with
    /// `interval_us` between calls. `done` is always called at least once.
    fn poll_until<F>(
        &mut self,
        limit: u32,
        interval_us: u32,
        waiting_for: &'static str,
        mut done: F,
    ) -> Result<(), Error<SPI::Error>>
    where
        F: FnMut(&mut Self) -> Result<bool, Error<SPI::Error>>,
    {
        for _ in 0..limit.max(1) {
            if done(self)? {
                return Ok(());
            }
            self.delay.delay_us(interval_us);
        }
        warn!("timed out waiting for {=str}", waiting_for);
        Err(Error::Timeout)
    }

    /// Resets the chip (SRES).
    ///
    /// Returns the status byte clocked out with the strobe.
    pub fn reset(&mut self) -> Result<StatusByte, Error<SPI::Error>> {
        debug!("reset");
        self.device.strobe(Strobe::Sres)
    }

    /// Calibrates the frequency synthesizer and turns it off (SCAL).
    pub fn calibrate(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe_and_settle(Strobe::Scal)
    }

    /// Enables TX (STX).
    pub fn enable_tx(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe_and_settle(Strobe::Stx)
    }

    /// Enables RX (SRX).
    pub fn enable_rx(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe_and_settle(Strobe::Srx)
    }

    /// Starts wake-on-radio polling (SWOR).
    pub fn wor_on(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe_and_settle(Strobe::Swor)
    }

    /// Turns off the crystal oscillator (SXOFF).
    pub fn oscillator_off(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe_and_settle(Strobe::Sxoff)
    }

    /// Enables and calibrates the synthesizer for a fast switch to TX (SFSTXON).
    pub fn fs_tx_on(&mut self) -> Result<(), Error<SPI::Error>> {
        self.strobe_and_settle(Strobe::Sfstxon)
    }

    /// Resets the real time clock to Event1 (SWORRST).
    pub fn wor_reset(&mut self) -> Result<(), Error<SPI::Error>> {
        self.device.strobe(Strobe::Sworrst).map(|_| ())
    }

    /// Flushes the RX FIFO (SFRX). Only valid in IDLE or RXFIFO_OVERFLOW.
    pub fn flush_rx_fifo(&mut self) -> Result<(), Error<SPI::Error>> {
        self.device.strobe(Strobe::Sfrx).map(|_| ())
    }

    /// Flushes the TX FIFO (SFTX). Only valid in IDLE or TXFIFO_UNDERFLOW.
    pub fn flush_tx_fifo(&mut self) -> Result<(), Error<SPI::Error>> {
        self.device.strobe(Strobe::Sftx).map(|_| ())
    }

    /// No operation (SNOP). Useful for reading the status byte.
    pub fn nop(&mut self) -> Result<StatusByte, Error<SPI::Error>> {
        self.device.strobe(Strobe::Snop)
    }

    /// Goes to IDLE, then powers down (SPWD) once chip select is released.
    pub fn power_down(&mut self) -> Result<(), Error<SPI::Error>> {
        self.sidle()?;
        self.device.strobe(Strobe::Spwd).map(|_| ())
    }

    /// Exits RX/TX and waits for IDLE, then flushes the TX FIFO.
    ///
    /// # Errors
    /// * `Error::Timeout` - IDLE not reached within `Config::idle_poll_limit` polls
    pub fn sidle(&mut self) -> Result<(), Error<SPI::Error>> {
        self.device.strobe(Strobe::Sidle)?;

        let limit = self.config.idle_poll_limit;
        self.poll_until(limit, STATE_POLL_US, "IDLE", |radio| {
            Ok(radio.polled_state()? == Some(ChipState::Idle))
        })?;

        self.flush_tx_fifo()?;
        self.delay.delay_us(STATE_POLL_US);
        Ok(())
    }

    /// Current main radio control state.
    ///
    /// # Errors
    /// * `Error::UnrecognizedValue` - MARC_STATE outside the documented states
    pub fn marcstate(&mut self) -> Result<ChipState, Error<SPI::Error>> {
        let state = self.device.read_register::<MarcState>()?.state;
        trace!("marcstate {}", state);
        Ok(state)
    }

    /// MARC_STATE as seen by the polling loops. Undefined codes read as `None`.
    fn polled_state(&mut self) -> Result<Option<ChipState>, Error<SPI::Error>> {
        let raw = self.device.read_byte(Register::Marcstate)? & 0x1F;
        Ok(ChipState::try_from(raw).ok())
    }

    /// Reads PARTNUM and VERSION and checks them against the schema.
    ///
    /// # Errors
    /// * `Error::ChipIdentityMismatch` - carries the values that were read
    pub fn sanity_check(&mut self) -> Result<ChipIdentity, Error<SPI::Error>> {
        let found = ChipIdentity {
            partnum: self.device.read_register::<PartNumber>()?.value,
            version: self.device.read_register::<ChipVersion>()?.value,
        };

        if found != self.schema.identity() {
            warn!(
                "unexpected chip: partnum {=u8:#x} version {=u8:#x}",
                found.partnum,
                found.version
            );
            return Err(Error::ChipIdentityMismatch {
                partnum: found.partnum,
                version: found.version,
            });
        }

        debug!("found chip version {=u8:#x}", found.version);
        Ok(found)
    }

    /// Reads a register and pairs it with its layout.
    ///
    /// # Errors
    /// * `Error::Schema` - the schema has no layout for `register`
    pub fn register_value(
        &mut self,
        register: Register,
    ) -> Result<RegisterSnapshot<'static>, Error<SPI::Error>> {
        let layout = self.schema.layout_for(register)?;
        let raw = self.device.read_byte(register)?;
        Ok(RegisterSnapshot::new(layout, raw))
    }

    /// Reads one named field of a register.
    ///
    /// # Errors
    /// * `Error::Schema` - unknown register or field
    pub fn register_field(&mut self, register: Register, name: &str) -> Result<u8, Error<SPI::Error>> {
        let field = self.schema.field_in(register, name)?;
        let raw = self.device.read_byte(register)?;
        Ok(bits::extract(raw, field)?)
    }

    /// Updates one named field of a register, keeping the other bits.
    ///
    /// The value is a number or a bit string no wider than the field,
    /// e.g. `set_register_field(Register::Mdmcfg2, "MOD_FORMAT", "011")`.
    ///
    /// # Errors
    /// * `Error::Schema` - unknown register or field
    /// * `Error::Field` - value does not fit the field
    pub fn set_register_field<'v>(
        &mut self,
        register: Register,
        name: &str,
        value: impl Into<FieldValue<'v>>,
    ) -> Result<(), Error<SPI::Error>> {
        let field = self.schema.field_in(register, name)?;
        let raw = self.device.read_byte(register)?;
        let updated = bits::insert(raw, field, value)?;
        trace!("{=str}.{=str}: {=u8:#x} -> {=u8:#x}", register.name(), name, raw, updated);
        self.device.write_byte(register, updated)
    }

    /// Carrier frequency in Hz, including the channel offset.
    pub fn base_frequency(&mut self) -> Result<u64, Error<SPI::Error>> {
        let word = (self.device.read_byte(Register::Freq2)? as u32) << 16
            | (self.device.read_byte(Register::Freq1)? as u32) << 8
            | self.device.read_byte(Register::Freq0)? as u32;
        let channel = self.register_field(Register::Channr, "CHAN")?;
        let spacing_m = self.register_field(Register::Mdmcfg0, "CHANSPC_M")?;
        let spacing_e = self.register_field(Register::Mdmcfg1, "CHANSPC_E")?;

        Ok(params::carrier_hz(
            self.config.osc_freq_hz,
            word,
            channel,
            spacing_m,
            spacing_e,
        ))
    }

    /// Sets the base carrier frequency.
    ///
    /// The chip is put in IDLE first.
    ///
    /// # Arguments
    /// * `mhz` - One of 315, 433, 868 or 915
    ///
    /// # Errors
    /// * `Error::UnsupportedParameterValue` - any other frequency
    pub fn set_base_frequency(&mut self, mhz: u16) -> Result<u64, Error<SPI::Error>> {
        if !CARRIERS_MHZ.contains(&mhz) {
            return Err(Error::UnsupportedParameterValue);
        }
        self.sidle()?;

        let word = params::frequency_word(mhz as u64 * 1_000_000, self.config.osc_freq_hz);
        self.device.write_byte(Register::Freq2, (word >> 16) as u8)?;
        self.device.write_byte(Register::Freq1, (word >> 8) as u8)?;
        self.device.write_byte(Register::Freq0, word as u8)?;
        debug!("carrier {=u16} MHz, FREQ {=u32:#x}", mhz, word);

        self.base_frequency()
    }

    /// Modulation format.
    ///
    /// # Errors
    /// * `Error::UnrecognizedValue` - MOD_FORMAT holds a reserved value
    pub fn modulation(&mut self) -> Result<Modulation, Error<SPI::Error>> {
        let bits = self.register_field(Register::Mdmcfg2, "MOD_FORMAT")?;
        Modulation::from_bits(bits).ok_or(Error::UnrecognizedValue(bits))
    }

    /// Sets the modulation format.
    pub fn set_modulation(&mut self, modulation: Modulation) -> Result<Modulation, Error<SPI::Error>> {
        self.set_register_field(Register::Mdmcfg2, "MOD_FORMAT", modulation.bits())?;
        self.modulation()
    }

    /// Packet length configuration.
    ///
    /// # Errors
    /// * `Error::UnrecognizedValue` - LENGTH_CONFIG holds the reserved value
    pub fn packet_length_mode(&mut self) -> Result<PacketLengthMode, Error<SPI::Error>> {
        let bits = self.register_field(Register::Pktctrl0, "LENGTH_CONFIG")?;
        PacketLengthMode::from_bits(bits).ok_or(Error::UnrecognizedValue(bits))
    }

    /// Sets the packet length configuration.
    ///
    /// # Errors
    /// * `Error::NotImplemented` - `PacketLengthMode::Infinite`; nothing is written
    pub fn set_packet_length_mode(
        &mut self,
        mode: PacketLengthMode,
    ) -> Result<PacketLengthMode, Error<SPI::Error>> {
        if mode == PacketLengthMode::Infinite {
            return Err(Error::NotImplemented);
        }
        self.set_register_field(Register::Pktctrl0, "LENGTH_CONFIG", mode.bits())?;
        self.packet_length_mode()
    }

    /// Channel number.
    pub fn channel(&mut self) -> Result<u8, Error<SPI::Error>> {
        Ok(self.device.read_register::<ChannelNumber>()?.value)
    }

    /// Sets the channel number.
    pub fn set_channel(&mut self, channel: u8) -> Result<u8, Error<SPI::Error>> {
        self.device.write_register(ChannelNumber { value: channel })?;
        self.channel()
    }

    /// Data rate in baud.
    pub fn baud_rate(&mut self) -> Result<u32, Error<SPI::Error>> {
        let exponent = self.register_field(Register::Mdmcfg4, "DRATE_E")?;
        let mantissa = self.register_field(Register::Mdmcfg3, "DRATE_M")?;
        Ok(params::data_rate_baud(self.config.osc_freq_hz, exponent, mantissa))
    }

    /// Sets the data rate, returning the rate the chip actually uses.
    ///
    /// # Errors
    /// * `Error::UnsupportedParameterValue` - the rate needs a DRATE_E outside 0..=15
    pub fn set_baud_rate(&mut self, baud: u32) -> Result<u32, Error<SPI::Error>> {
        let (exponent, mantissa) = params::data_rate_setting(baud, self.config.osc_freq_hz)
            .ok_or(Error::UnsupportedParameterValue)?;

        self.set_register_field(Register::Mdmcfg4, "DRATE_E", exponent)?;
        self.set_register_field(Register::Mdmcfg3, "DRATE_M", mantissa)?;
        debug!("data rate {=u32} baud: E {=u8} M {=u8}", baud, exponent, mantissa);

        self.baud_rate()
    }

    /// Receive filter bandwidth in Hz.
    pub fn rx_bandwidth(&mut self) -> Result<u32, Error<SPI::Error>> {
        let snapshot = self.register_value(Register::Mdmcfg4)?;
        let exponent = snapshot.get("CHANBW_E")?;
        let mantissa = snapshot.get("CHANBW_M")?;
        Ok(params::rx_bandwidth_hz(self.config.osc_freq_hz, exponent, mantissa))
    }

    /// Sets the receive filter bandwidth.
    ///
    /// # Arguments
    /// * `hz` - One of the bandwidths in [`params::RX_BANDWIDTHS`]
    ///
    /// # Errors
    /// * `Error::UnsupportedParameterValue` - any other bandwidth
    pub fn set_rx_bandwidth(&mut self, hz: u32) -> Result<u32, Error<SPI::Error>> {
        let (exponent, mantissa) =
            params::rx_bandwidth_setting(hz).ok_or(Error::UnsupportedParameterValue)?;

        let raw = self.device.read_byte(Register::Mdmcfg4)?;
        let raw = bits::insert(raw, self.schema.field_in(Register::Mdmcfg4, "CHANBW_E")?, exponent)?;
        let raw = bits::insert(raw, self.schema.field_in(Register::Mdmcfg4, "CHANBW_M")?, mantissa)?;
        self.device.write_byte(Register::Mdmcfg4, raw)?;

        self.rx_bandwidth()
    }

    /// Whether Manchester coding is enabled.
    pub fn manchester(&mut self) -> Result<bool, Error<SPI::Error>> {
        Ok(self.register_field(Register::Mdmcfg2, "MANCHESTER_EN")? != 0)
    }

    /// Enables or disables Manchester coding.
    pub fn set_manchester(&mut self, enabled: bool) -> Result<bool, Error<SPI::Error>> {
        self.set_register_field(Register::Mdmcfg2, "MANCHESTER_EN", enabled)?;
        self.manchester()
    }

    /// Whether data whitening is enabled.
    pub fn whitening(&mut self) -> Result<bool, Error<SPI::Error>> {
        Ok(self.register_field(Register::Pktctrl0, "WHITE_DATA")? != 0)
    }

    /// Enables or disables data whitening.
    pub fn set_whitening(&mut self, enabled: bool) -> Result<bool, Error<SPI::Error>> {
        self.set_register_field(Register::Pktctrl0, "WHITE_DATA", enabled)?;
        self.whitening()
    }

    /// Channel spacing in Hz.
    pub fn channel_spacing(&mut self) -> Result<u32, Error<SPI::Error>> {
        let mantissa = self.register_field(Register::Mdmcfg0, "CHANSPC_M")?;
        let exponent = self.register_field(Register::Mdmcfg1, "CHANSPC_E")?;
        Ok(params::channel_spacing_hz(self.config.osc_freq_hz, mantissa, exponent))
    }

    /// 16 bit sync word (SYNC1:SYNC0).
    pub fn sync_word(&mut self) -> Result<SyncWord, Error<SPI::Error>> {
        let high = self.device.read_byte(Register::Sync1)?;
        let low = self.device.read_byte(Register::Sync0)?;
        Ok(SyncWord(u16::from_be_bytes([high, low])))
    }

    /// Sets the sync word.
    ///
    /// Text is converted with `SyncWord::try_from("D391")`, numbers with
    /// `SyncWord::from(0xD391)`.
    pub fn set_sync_word(&mut self, word: SyncWord) -> Result<SyncWord, Error<SPI::Error>> {
        self.set_register_field(Register::Sync1, "SYNC[15:8]", word.high())?;
        self.set_register_field(Register::Sync0, "SYNC[7:0]", word.low())?;
        self.sync_word()
    }

    /// Received signal strength in dBm.
    pub fn rssi(&mut self) -> Result<f32, Error<SPI::Error>> {
        let rssi = self.device.read_register::<Rssi>()?;
        Ok(rssi.dbm(self.schema.rssi_offset()))
    }

    /// CRC result and link quality estimate of the last packet.
    pub fn link_quality(&mut self) -> Result<LinkQuality, Error<SPI::Error>> {
        self.device.read_register::<LinkQuality>()
    }

    /// GDOx and packet status flags.
    pub fn packet_status(&mut self) -> Result<PacketStatusFlags, Error<SPI::Error>> {
        Ok(self.device.read_register::<PacketStatus>()?.flags)
    }

    /// Device address sent ahead of the payload, if APPEND_STATUS is set.
    fn frame_address(&mut self) -> Result<Option<u8>, Error<SPI::Error>> {
        if self.register_field(Register::Pktctrl1, "APPEND_STATUS")? == 0 {
            return Ok(None);
        }
        Ok(Some(self.device.read_register::<DeviceAddress>()?.value))
    }

    /// Sends one packet.
    ///
    /// Frames the payload for the configured length mode, writes it to the
    /// TX FIFO and waits for the FIFO to drain.
    ///
    /// Returns `false` when the chip did not start transmitting; it is put
    /// back in RX with an empty TX FIFO. Also `false` when the TX FIFO
    /// underflowed. Otherwise returns whether the TX FIFO ended up empty.
    ///
    /// # Errors
    /// * `Error::EmptyPayload` - nothing to send; the bus is not touched
    /// * `Error::PayloadTooLarge` - payload does not fit the packet length
    /// * `Error::NotImplemented` - infinite length mode
    /// * `Error::Timeout` - a polling loop ran out
    pub fn send_data(&mut self, payload: &[u8]) -> Result<bool, Error<SPI::Error>> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }

        self.enable_tx()?;
        let limit = self.config.tx_ready_poll_limit;
        self.poll_until(limit, STATE_POLL_US, "RX before transmit", |radio| {
            match radio.polled_state()? {
                Some(ChipState::Rx) => Ok(true),
                Some(ChipState::RxFifoOverflow) => {
                    radio.flush_rx_fifo()?;
                    Ok(false)
                }
                _ => Ok(false),
            }
        })?;

        let mode = self.packet_length_mode()?;
        let packet_length = self.device.read_register::<PacketLength>()?.value;
        let address = self.frame_address()?;
        let frame = TxFrame::build::<SPI::Error>(mode, payload, address, packet_length)?;

        self.device.write_burst(Fifo::Tx, frame.as_bytes())?;
        self.delay.delay_us(TX_FILL_WAIT_US);
        self.enable_tx()?;

        let state = self.polled_state()?;
        if !state.is_some_and(ChipState::is_transmitting) {
            warn!("transmit did not start, state {}", state);
            self.sidle()?;
            self.flush_tx_fifo()?;
            self.enable_rx()?;
            return Ok(false);
        }

        let limit = self.config.tx_drain_poll_limit;
        self.poll_until(limit, DRAIN_POLL_US, "TX FIFO drain", |radio| {
            let tx_bytes = radio.device.read_register::<TxBytes>()?;
            Ok(tx_bytes.underflow || tx_bytes.count == 0)
        })?;

        let tx_bytes = self.device.read_register::<TxBytes>()?;
        if tx_bytes.underflow {
            warn!("TX FIFO underflow");
            return Ok(false);
        }
        let sent = tx_bytes.count & 0x07 == 0;
        debug!("sent {=usize} byte frame: {=bool}", frame.as_bytes().len(), sent);
        Ok(sent)
    }

    /// Receives one packet if the RX FIFO holds one.
    ///
    /// Enables RX first. On success the RX FIFO is flushed and the chip left
    /// in IDLE.
    ///
    /// # Errors
    /// * `Error::NotImplemented` - infinite length mode
    pub fn recv_data(&mut self) -> Result<Reception, Error<SPI::Error>> {
        self.enable_rx()?;

        let rx_bytes = self.device.read_register::<RxBytes>()?;
        if rx_bytes.count == 0 || rx_bytes.overflow {
            return Ok(Reception::Empty);
        }

        let packet_length = self.device.read_register::<PacketLength>()?.value;
        let len = match self.packet_length_mode()? {
            PacketLengthMode::Fixed => packet_length,
            PacketLengthMode::Variable => {
                let len = self.device.read_byte(Fifo::Rx)?;
                if len > packet_length {
                    warn!("length byte {=u8} above PKTLEN {=u8}", len, packet_length);
                    return Ok(Reception::Oversized(len));
                }
                len
            }
            PacketLengthMode::Infinite => return Err(Error::NotImplemented),
        };

        let mut packet = RxPacket::zeroed(len);
        self.device.read_burst(Fifo::Rx, packet.as_mut_slice())?;
        self.flush_rx_fifo()?;
        self.sidle()?;

        debug!("received {=u8} bytes", len);
        Ok(Reception::Packet(packet))
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::spi::{Mock, Transaction};

    use super::*;

    fn read(header: u8, value: u8) -> Vec<Transaction<u8>> {
        vec![
            Transaction::transaction_start(),
            Transaction::transfer_in_place(vec![header, 0x00], vec![0x0F, value]),
            Transaction::transaction_end(),
        ]
    }

    fn write(header: u8, value: u8) -> Vec<Transaction<u8>> {
        vec![
            Transaction::transaction_start(),
            Transaction::write_vec(vec![header, value]),
            Transaction::transaction_end(),
        ]
    }

    fn strobe(addr: u8) -> Vec<Transaction<u8>> {
        read(addr, 0x00)
    }

    #[test]
    fn empty_payload_touches_nothing() {
        let expectations: [Transaction<u8>; 0] = [];
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(radio.send_data(&[]), Err(Error::EmptyPayload));
        spi.done();
    }

    #[test]
    fn modulation_is_read_modify_write() {
        // MDMCFG2 reset value 0x02, MOD_FORMAT 000 -> 011
        let expectations = [read(0x92, 0x02), write(0x12, 0x32), read(0x92, 0x32)].concat();
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(radio.set_modulation(Modulation::AskOok), Ok(Modulation::AskOok));
        spi.done();
    }

    #[test]
    fn unknown_modulation_bits() {
        let expectations = read(0x92, 0x24);
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(radio.modulation(), Err(Error::UnrecognizedValue(0b010)));
        spi.done();
    }

    #[test]
    fn infinite_length_mode_is_refused() {
        let expectations: [Transaction<u8>; 0] = [];
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(
            radio.set_packet_length_mode(PacketLengthMode::Infinite),
            Err(Error::NotImplemented)
        );
        spi.done();
    }

    #[test]
    fn sidle_waits_for_idle_then_flushes_tx() {
        let expectations = [
            strobe(0x36),
            read(0xF5, 0x0D),
            read(0xF5, 0x01),
            strobe(0x3B),
        ]
        .concat();
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        radio.sidle().unwrap();
        spi.done();
    }

    #[test]
    fn sidle_gives_up() {
        let expectations = [strobe(0x36), read(0xF5, 0x0D), read(0xF5, 0x0D)].concat();
        let mut spi = Mock::new(&expectations);
        let config = Config::default().with_idle_poll_limit(2);
        let mut radio =
            Cc1101::with_config(spi.clone(), NoopDelay::new(), RegisterSchema::default(), config);

        assert_eq!(radio.sidle(), Err(Error::Timeout));
        spi.done();
    }

    #[test]
    fn sidle_ignores_undefined_state_codes() {
        let expectations = [
            strobe(0x36),
            read(0xF5, 0x1F),
            read(0xF5, 0x01),
            strobe(0x3B),
        ]
        .concat();
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(radio.sidle(), Ok(()));
        spi.done();
    }

    #[test]
    fn unsupported_carrier() {
        let expectations: [Transaction<u8>; 0] = [];
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(radio.set_base_frequency(430), Err(Error::UnsupportedParameterValue));
        assert_eq!(radio.set_rx_bandwidth(200_000), Err(Error::UnsupportedParameterValue));
        assert_eq!(radio.set_baud_rate(1), Err(Error::UnsupportedParameterValue));
        spi.done();
    }

    #[test]
    fn rssi_applies_offset() {
        let expectations = [read(0xF4, 0x80), read(0xF4, 0x14)].concat();
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        assert_eq!(radio.rssi(), Ok(-138.0));
        assert_eq!(radio.rssi(), Ok(-64.0));
        spi.done();
    }

    #[test]
    fn sync_word_bytes() {
        let expectations = [
            read(0x84, 0xD3),
            write(0x04, 0xFA),
            read(0x85, 0x91),
            write(0x05, 0xFA),
            read(0x84, 0xFA),
            read(0x85, 0xFA),
        ]
        .concat();
        let mut spi = Mock::new(&expectations);
        let mut radio = Cc1101::new(spi.clone(), NoopDelay::new());

        let word = radio.set_sync_word(SyncWord::try_from("FAFA").unwrap()).unwrap();
        assert_eq!(word, SyncWord(0xFAFA));
        spi.done();
    }
}
