//! Register, strobe and FIFO addresses
//!
//! The CC1101 shares one 8-bit address space between four classes of target:
//!
//! | Range       | Class                                               |
//! |-------------|-----------------------------------------------------|
//! | 0x00 - 0x28 | Configuration registers, retained in SLEEP          |
//! | 0x29 - 0x2E | Configuration registers, lost in SLEEP              |
//! | 0x30 - 0x3D | Command strobes                                     |
//! | 0x3E        | PATABLE                                             |
//! | 0x3F        | TX FIFO (write) / RX FIFO (read)                    |
//! | 0xF0 - 0xFD | Status registers (burst bit set to reach them)      |
//!
//! Each bus transaction starts with a header byte: the access mode in bits
//! 7:6 OR'd with the target address.

use crate::schema::SchemaError;
use crate::Error;

/// Header bits for a single byte write
pub const WRITE_SINGLE: u8 = 0x00;
/// Header bits for a burst write
pub const WRITE_BURST: u8 = 0x40;
/// Header bits for a single byte read
pub const READ_SINGLE: u8 = 0x80;
/// Header bits for a burst read
pub const READ_BURST: u8 = 0xC0;

macro_rules! address_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $addr:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every variant, in address order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Bus address of this target
            pub const fn addr(self) -> u8 {
                match self {
                    $( $name::$variant => $addr, )+
                }
            }

            /// Datasheet name of this target
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $text, )+
                }
            }

            /// Looks a target up by its datasheet name.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.name() == name)
            }
        }
    };
}

address_enum! {
    /// Configuration and status registers
    pub enum Register {
        /// GDO2 output pin configuration
        Iocfg2 = 0x00 => "IOCFG2",
        /// GDO1 output pin configuration
        Iocfg1 = 0x01 => "IOCFG1",
        /// GDO0 output pin configuration
        Iocfg0 = 0x02 => "IOCFG0",
        /// RX FIFO and TX FIFO thresholds
        Fifothr = 0x03 => "FIFOTHR",
        /// Sync word, high byte
        Sync1 = 0x04 => "SYNC1",
        /// Sync word, low byte
        Sync0 = 0x05 => "SYNC0",
        /// Packet length
        Pktlen = 0x06 => "PKTLEN",
        /// Packet automation control
        Pktctrl1 = 0x07 => "PKTCTRL1",
        /// Packet automation control
        Pktctrl0 = 0x08 => "PKTCTRL0",
        /// Device address
        Addr = 0x09 => "ADDR",
        /// Channel number
        Channr = 0x0A => "CHANNR",
        /// Frequency synthesizer control
        Fsctrl1 = 0x0B => "FSCTRL1",
        /// Frequency synthesizer control
        Fsctrl0 = 0x0C => "FSCTRL0",
        /// Frequency control word, high byte
        Freq2 = 0x0D => "FREQ2",
        /// Frequency control word, middle byte
        Freq1 = 0x0E => "FREQ1",
        /// Frequency control word, low byte
        Freq0 = 0x0F => "FREQ0",
        /// Modem configuration
        Mdmcfg4 = 0x10 => "MDMCFG4",
        /// Modem configuration
        Mdmcfg3 = 0x11 => "MDMCFG3",
        /// Modem configuration
        Mdmcfg2 = 0x12 => "MDMCFG2",
        /// Modem configuration
        Mdmcfg1 = 0x13 => "MDMCFG1",
        /// Modem configuration
        Mdmcfg0 = 0x14 => "MDMCFG0",
        /// Modem deviation setting
        Deviatn = 0x15 => "DEVIATN",
        /// Main radio control state machine configuration
        Mcsm2 = 0x16 => "MCSM2",
        /// Main radio control state machine configuration
        Mcsm1 = 0x17 => "MCSM1",
        /// Main radio control state machine configuration
        Mcsm0 = 0x18 => "MCSM0",
        /// Frequency offset compensation configuration
        Foccfg = 0x19 => "FOCCFG",
        /// Bit synchronization configuration
        Bscfg = 0x1A => "BSCFG",
        /// AGC control
        Agcctrl2 = 0x1B => "AGCCTRL2",
        /// AGC control
        Agcctrl1 = 0x1C => "AGCCTRL1",
        /// AGC control
        Agcctrl0 = 0x1D => "AGCCTRL0",
        /// High byte event 0 timeout
        Worevt1 = 0x1E => "WOREVT1",
        /// Low byte event 0 timeout
        Worevt0 = 0x1F => "WOREVT0",
        /// Wake on radio control
        Worctrl = 0x20 => "WORCTRL",
        /// Front end RX configuration
        Frend1 = 0x21 => "FREND1",
        /// Front end TX configuration
        Frend0 = 0x22 => "FREND0",
        /// Frequency synthesizer calibration
        Fscal3 = 0x23 => "FSCAL3",
        /// Frequency synthesizer calibration
        Fscal2 = 0x24 => "FSCAL2",
        /// Frequency synthesizer calibration
        Fscal1 = 0x25 => "FSCAL1",
        /// Frequency synthesizer calibration
        Fscal0 = 0x26 => "FSCAL0",
        /// RC oscillator configuration
        Rcctrl1 = 0x27 => "RCCTRL1",
        /// RC oscillator configuration
        Rcctrl0 = 0x28 => "RCCTRL0",
        /// Frequency synthesizer calibration control
        Fstest = 0x29 => "FSTEST",
        /// Production test
        Ptest = 0x2A => "PTEST",
        /// AGC test
        Agctest = 0x2B => "AGCTEST",
        /// Various test settings
        Test2 = 0x2C => "TEST2",
        /// Various test settings
        Test1 = 0x2D => "TEST1",
        /// Various test settings
        Test0 = 0x2E => "TEST0",
        /// Chip part number
        Partnum = 0xF0 => "PARTNUM",
        /// Chip version number
        Version = 0xF1 => "VERSION",
        /// Frequency offset estimate from demodulator
        Freqest = 0xF2 => "FREQEST",
        /// Demodulator estimate for link quality
        Lqi = 0xF3 => "LQI",
        /// Received signal strength indication
        Rssi = 0xF4 => "RSSI",
        /// Main radio control state machine state
        Marcstate = 0xF5 => "MARCSTATE",
        /// High byte of WOR time
        Wortime1 = 0xF6 => "WORTIME1",
        /// Low byte of WOR time
        Wortime0 = 0xF7 => "WORTIME0",
        /// Current GDOx status and packet status
        Pktstatus = 0xF8 => "PKTSTATUS",
        /// Current setting from PLL calibration module
        VcoVcDac = 0xF9 => "VCO_VC_DAC",
        /// Underflow and number of bytes in the TX FIFO
        Txbytes = 0xFA => "TXBYTES",
        /// Overflow and number of bytes in the RX FIFO
        Rxbytes = 0xFB => "RXBYTES",
        /// Last RC oscillator calibration result
        Rcctrl1Status = 0xFC => "RCCTRL1_STATUS",
        /// Last RC oscillator calibration result
        Rcctrl0Status = 0xFD => "RCCTRL0_STATUS",
    }
}

impl Register {
    /// Configuration registers keep their value through SLEEP; status
    /// registers and the test registers at 0x29-0x2E do not.
    pub const fn retained_in_sleep(self) -> bool {
        self.addr() <= Register::Rcctrl0.addr()
    }

    /// Status registers are read only.
    pub const fn is_status(self) -> bool {
        self.addr() >= Register::Partnum.addr()
    }
}

address_enum! {
    /// Command strobes
    ///
    /// A strobe is a header byte with no payload that makes the chip act
    /// immediately.
    pub enum Strobe {
        /// Reset chip
        Sres = 0x30 => "SRES",
        /// Enable and calibrate frequency synthesizer
        Sfstxon = 0x31 => "SFSTXON",
        /// Turn off crystal oscillator
        Sxoff = 0x32 => "SXOFF",
        /// Calibrate frequency synthesizer and turn it off
        Scal = 0x33 => "SCAL",
        /// Enable RX
        Srx = 0x34 => "SRX",
        /// Enable TX
        Stx = 0x35 => "STX",
        /// Exit RX / TX, turn off frequency synthesizer
        Sidle = 0x36 => "SIDLE",
        /// Start automatic RX polling sequence (Wake-on-Radio)
        Swor = 0x38 => "SWOR",
        /// Enter power down mode when CSn goes high
        Spwd = 0x39 => "SPWD",
        /// Flush the RX FIFO buffer
        Sfrx = 0x3A => "SFRX",
        /// Flush the TX FIFO buffer
        Sftx = 0x3B => "SFTX",
        /// Reset real time clock to Event1 value
        Sworrst = 0x3C => "SWORRST",
        /// No operation, returns the status byte
        Snop = 0x3D => "SNOP",
    }
}

address_enum! {
    /// FIFO and PA table pseudo-registers
    ///
    /// The TX and RX FIFOs share address 0x3F; the read/write bit of the
    /// header picks which one is accessed.
    pub enum Fifo {
        /// Power amplifier table
        Patable = 0x3E => "PATABLE",
        /// Transmit FIFO
        Tx = 0x3F => "TXFIFO",
        /// Receive FIFO
        Rx = 0x3F => "RXFIFO",
    }
}

/// Reference to a bus target
///
/// Most callers use the typed variants; raw numbers and names are accepted
/// for direct register poking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address<'a> {
    /// Raw numeric address. Must fit in a byte.
    Raw(i32),
    Register(Register),
    Strobe(Strobe),
    Fifo(Fifo),
    /// Datasheet name of a register, strobe or FIFO
    Name(&'a str),
}

impl Address<'_> {
    /// Resolves the reference to a bus address.
    pub fn resolve<E>(self) -> Result<u8, Error<E>> {
        match self {
            Address::Raw(addr) => u8::try_from(addr).map_err(|_| Error::InvalidAddress(addr)),
            Address::Register(reg) => Ok(reg.addr()),
            Address::Strobe(strobe) => Ok(strobe.addr()),
            Address::Fifo(fifo) => Ok(fifo.addr()),
            Address::Name(name) => lookup(name).ok_or(Error::Schema(SchemaError::UnknownRegister)),
        }
    }
}

/// Static name table covering registers, strobes and FIFOs.
fn lookup(name: &str) -> Option<u8> {
    Register::from_name(name)
        .map(Register::addr)
        .or_else(|| Strobe::from_name(name).map(Strobe::addr))
        .or_else(|| Fifo::from_name(name).map(Fifo::addr))
}

impl From<u8> for Address<'_> {
    fn from(addr: u8) -> Self {
        Address::Raw(addr as i32)
    }
}

impl From<i32> for Address<'_> {
    fn from(addr: i32) -> Self {
        Address::Raw(addr)
    }
}

impl From<Register> for Address<'_> {
    fn from(reg: Register) -> Self {
        Address::Register(reg)
    }
}

impl From<Strobe> for Address<'_> {
    fn from(strobe: Strobe) -> Self {
        Address::Strobe(strobe)
    }
}

impl From<Fifo> for Address<'_> {
    fn from(fifo: Fifo) -> Self {
        Address::Fifo(fifo)
    }
}

impl<'a> From<&'a str> for Address<'a> {
    fn from(name: &'a str) -> Self {
        Address::Name(name)
    }
}
