#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::{ErrorType, Operation, SpiDevice};

pub const SRES: u8 = 0x30;
pub const SFSTXON: u8 = 0x31;
pub const SXOFF: u8 = 0x32;
pub const SRX: u8 = 0x34;
pub const STX: u8 = 0x35;
pub const SIDLE: u8 = 0x36;
pub const SWOR: u8 = 0x38;
pub const SPWD: u8 = 0x39;
pub const SFRX: u8 = 0x3A;
pub const SFTX: u8 = 0x3B;
pub const SWORRST: u8 = 0x3C;
pub const SNOP: u8 = 0x3D;

pub const IDLE: u8 = 0x01;
pub const RX: u8 = 0x0D;
pub const RXFIFO_OVERFLOW: u8 = 0x11;
pub const TX: u8 = 0x13;

/// Register file model of a CC1101
///
/// Configuration registers hold whatever was last written. MARCSTATE,
/// TXBYTES and RXBYTES are scripted: each read consumes one entry and the
/// last entry repeats forever.
pub struct FakeChip {
    pub regs: [u8; 0x2F],
    pub partnum: u8,
    pub version: u8,
    pub rssi: u8,
    pub lqi: u8,
    pub pktstatus: u8,
    pub marcstates: VecDeque<u8>,
    pub txbytes: VecDeque<u8>,
    pub rxbytes: VecDeque<u8>,
    pub rx_fifo: VecDeque<u8>,
    /// Every strobe, in order
    pub strobes: Vec<u8>,
    /// Every single register write, in order
    pub writes: Vec<(u8, u8)>,
    /// Every burst written to the TX FIFO
    pub tx_bursts: Vec<Vec<u8>>,
    pub rx_burst_reads: usize,
}

impl FakeChip {
    /// A chip with reset register values, idle, with empty FIFOs.
    pub fn new() -> Self {
        let mut regs = [0u8; 0x2F];
        regs[0x04] = 0xD3; // SYNC1
        regs[0x05] = 0x91; // SYNC0
        regs[0x06] = 0xFF; // PKTLEN
        regs[0x07] = 0x04; // PKTCTRL1
        regs[0x08] = 0x45; // PKTCTRL0
        regs[0x0D] = 0x1E; // FREQ2
        regs[0x0E] = 0xC4; // FREQ1
        regs[0x0F] = 0xEC; // FREQ0
        regs[0x10] = 0x8C; // MDMCFG4
        regs[0x11] = 0x22; // MDMCFG3
        regs[0x12] = 0x02; // MDMCFG2
        regs[0x13] = 0x22; // MDMCFG1
        regs[0x14] = 0xF8; // MDMCFG0

        Self {
            regs,
            partnum: 0x00,
            version: 0x14,
            rssi: 0x00,
            lqi: 0x00,
            pktstatus: 0x00,
            marcstates: VecDeque::from([IDLE]),
            txbytes: VecDeque::from([0]),
            rxbytes: VecDeque::from([0]),
            rx_fifo: VecDeque::new(),
            strobes: Vec::new(),
            writes: Vec::new(),
            tx_bursts: Vec::new(),
            rx_burst_reads: 0,
        }
    }

    pub fn with_marcstates(mut self, states: &[u8]) -> Self {
        self.marcstates = states.iter().copied().collect();
        self
    }

    pub fn with_txbytes(mut self, counts: &[u8]) -> Self {
        self.txbytes = counts.iter().copied().collect();
        self
    }

    pub fn with_rx(mut self, rxbytes: u8, fifo: &[u8]) -> Self {
        self.rxbytes = VecDeque::from([rxbytes]);
        self.rx_fifo = fifo.iter().copied().collect();
        self
    }

    pub fn with_reg(mut self, addr: u8, value: u8) -> Self {
        self.regs[addr as usize] = value;
        self
    }

    fn scripted(queue: &mut VecDeque<u8>) -> u8 {
        if queue.len() > 1 {
            queue.pop_front().unwrap_or(0)
        } else {
            queue.front().copied().unwrap_or(0)
        }
    }

    fn status_register(&mut self, addr: u8) -> u8 {
        match addr {
            0xF0 => self.partnum,
            0xF1 => self.version,
            0xF3 => self.lqi,
            0xF4 => self.rssi,
            0xF5 => Self::scripted(&mut self.marcstates),
            0xF8 => self.pktstatus,
            0xFA => Self::scripted(&mut self.txbytes),
            0xFB => Self::scripted(&mut self.rxbytes),
            _ => 0,
        }
    }

    fn transfer(&mut self, buf: &mut [u8]) {
        let header = buf[0];
        buf[0] = 0x0F;
        match header {
            0x30..=0x3D if buf.len() == 2 => self.strobes.push(header),
            // RX FIFO burst
            0xFF => {
                self.rx_burst_reads += 1;
                for byte in buf[1..].iter_mut() {
                    *byte = self.rx_fifo.pop_front().unwrap_or(0);
                }
            }
            // RX FIFO single
            0xBF => buf[1] = self.rx_fifo.pop_front().unwrap_or(0),
            0xF0..=0xFD => buf[1] = self.status_register(header),
            h if h & 0xC0 == 0x80 && ((h & 0x3F) as usize) < self.regs.len() => {
                buf[1] = self.regs[(h & 0x3F) as usize];
            }
            _ => {}
        }
    }

    fn write(&mut self, addr: u8, value: u8) {
        self.writes.push((addr, value));
        if (addr as usize) < self.regs.len() {
            self.regs[addr as usize] = value;
        }
    }
}

impl ErrorType for FakeChip {
    type Error = Infallible;
}

impl SpiDevice for FakeChip {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut burst_addr = None;
        for op in operations.iter_mut() {
            match op {
                Operation::TransferInPlace(buf) => self.transfer(buf),
                Operation::Write(data) => {
                    let data: &[u8] = data;
                    match burst_addr.take() {
                        Some(0x3F) => self.tx_bursts.push(data.to_vec()),
                        Some(addr) => {
                            for (i, value) in data.iter().enumerate() {
                                self.write(addr + i as u8, *value);
                            }
                        }
                        None if data.len() == 1 && data[0] & 0x40 != 0 => {
                            burst_addr = Some(data[0] & 0x3F);
                        }
                        None if data.len() == 2 => self.write(data[0] & 0x3F, data[1]),
                        None => {}
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Delay provider that only adds up the time asked for
#[derive(Default)]
pub struct Clock {
    pub elapsed_ns: u64,
}

impl Clock {
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_ns / 1_000
    }
}

impl DelayNs for Clock {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
    }
}
