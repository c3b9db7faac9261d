//! CC1101 register map
//! Taken from the CC1101 datasheet (SWRS061), section 29.
//!
//! Field positions use the MSB-first indexing of [`crate::bits`]: datasheet
//! bit 7 is index 0.

use super::{ChipIdentity, RegisterLayout, RegisterSchema};
use crate::address::Register;
use crate::bits::Field;

macro_rules! layout {
    ($reg:ident { $( $name:literal : [$index:literal, $width:literal] ),* $(,)? }) => {
        RegisterLayout {
            register: Register::$reg,
            fields: &[ $( Field { name: $name, index: $index, width: $width } ),* ],
        }
    };
}

/// MARCSTATE: main radio control state
pub const MARC_STATE: Field = Field::new("MARC_STATE", 3, 5);
/// TXBYTES: TX FIFO underflow flag
pub const TXFIFO_UNDERFLOW: Field = Field::new("TXFIFO_UNDERFLOW", 0, 1);
/// TXBYTES: bytes in the TX FIFO
pub const NUM_TXBYTES: Field = Field::new("NUM_TXBYTES", 1, 7);
/// RXBYTES: RX FIFO overflow flag
pub const RXFIFO_OVERFLOW: Field = Field::new("RXFIFO_OVERFLOW", 0, 1);
/// RXBYTES: bytes in the RX FIFO
pub const NUM_RXBYTES: Field = Field::new("NUM_RXBYTES", 1, 7);
/// LQI: CRC of the last packet matched
pub const CRC_OK: Field = Field::new("CRC_OK", 0, 1);
/// LQI: link quality estimate
pub const LQI_EST: Field = Field::new("LQI_EST", 1, 7);

const LAYOUTS: &[RegisterLayout] = &[
    layout!(Iocfg2 { "GDO2_INV": [1, 1], "GDO2_CFG": [2, 6] }),
    layout!(Iocfg1 { "GDO_DS": [0, 1], "GDO1_INV": [1, 1], "GDO1_CFG": [2, 6] }),
    layout!(Iocfg0 { "TEMP_SENSOR_ENABLE": [0, 1], "GDO0_INV": [1, 1], "GDO0_CFG": [2, 6] }),
    layout!(Fifothr { "ADC_RETENTION": [1, 1], "CLOSE_IN_RX": [2, 2], "FIFO_THR": [4, 4] }),
    layout!(Sync1 { "SYNC[15:8]": [0, 8] }),
    layout!(Sync0 { "SYNC[7:0]": [0, 8] }),
    layout!(Pktlen { "PACKET_LENGTH": [0, 8] }),
    layout!(Pktctrl1 {
        "PQT": [0, 3],
        "CRC_AUTOFLUSH": [4, 1],
        "APPEND_STATUS": [5, 1],
        "ADR_CHK": [6, 2],
    }),
    layout!(Pktctrl0 {
        "WHITE_DATA": [1, 1],
        "PKT_FORMAT": [2, 2],
        "CRC_EN": [5, 1],
        "LENGTH_CONFIG": [6, 2],
    }),
    layout!(Addr { "DEVICE_ADDR": [0, 8] }),
    layout!(Channr { "CHAN": [0, 8] }),
    layout!(Fsctrl1 { "FREQ_IF": [3, 5] }),
    layout!(Fsctrl0 { "FREQOFF": [0, 8] }),
    layout!(Freq2 { "FREQ[23:22]": [0, 2], "FREQ[21:16]": [2, 6] }),
    layout!(Freq1 { "FREQ[15:8]": [0, 8] }),
    layout!(Freq0 { "FREQ[7:0]": [0, 8] }),
    layout!(Mdmcfg4 { "CHANBW_E": [0, 2], "CHANBW_M": [2, 2], "DRATE_E": [4, 4] }),
    layout!(Mdmcfg3 { "DRATE_M": [0, 8] }),
    layout!(Mdmcfg2 {
        "DEM_DCFILT_OFF": [0, 1],
        "MOD_FORMAT": [1, 3],
        "MANCHESTER_EN": [4, 1],
        "SYNC_MODE": [5, 3],
    }),
    layout!(Mdmcfg1 { "FEC_EN": [0, 1], "NUM_PREAMBLE": [1, 3], "CHANSPC_E": [6, 2] }),
    layout!(Mdmcfg0 { "CHANSPC_M": [0, 8] }),
    layout!(Deviatn { "DEVIATION_E": [1, 3], "DEVIATION_M": [5, 3] }),
    layout!(Mcsm2 { "RX_TIME_RSSI": [3, 1], "RX_TIME_QUAL": [4, 1], "RX_TIME": [5, 3] }),
    layout!(Mcsm1 { "CCA_MODE": [2, 2], "RXOFF_MODE": [4, 2], "TXOFF_MODE": [6, 2] }),
    layout!(Mcsm0 {
        "FS_AUTOCAL": [2, 2],
        "PO_TIMEOUT": [4, 2],
        "PIN_CTRL_EN": [6, 1],
        "XOSC_FORCE_ON": [7, 1],
    }),
    layout!(Foccfg {
        "FOC_BS_CS_GATE": [2, 1],
        "FOC_PRE_K": [3, 2],
        "FOC_POST_K": [5, 1],
        "FOC_LIMIT": [6, 2],
    }),
    layout!(Bscfg {
        "BS_PRE_KI": [0, 2],
        "BS_PRE_KP": [2, 2],
        "BS_POST_KI": [4, 1],
        "BS_POST_KP": [5, 1],
        "BS_LIMIT": [6, 2],
    }),
    layout!(Agcctrl2 { "MAX_DVGA_GAIN": [0, 2], "MAX_LNA_GAIN": [2, 3], "MAGN_TARGET": [5, 3] }),
    layout!(Agcctrl1 {
        "AGC_LNA_PRIORITY": [1, 1],
        "CARRIER_SENSE_REL_THR": [2, 2],
        "CARRIER_SENSE_ABS_THR": [4, 4],
    }),
    layout!(Agcctrl0 {
        "HYST_LEVEL": [0, 2],
        "WAIT_TIME": [2, 2],
        "AGC_FREEZE": [4, 2],
        "FILTER_LENGTH": [6, 2],
    }),
    layout!(Worevt1 { "EVENT0[15:8]": [0, 8] }),
    layout!(Worevt0 { "EVENT0[7:0]": [0, 8] }),
    layout!(Worctrl { "RC_PD": [0, 1], "EVENT1": [1, 3], "RC_CAL": [4, 1], "WOR_RES": [6, 2] }),
    layout!(Frend1 {
        "LNA_CURRENT": [0, 2],
        "LNA2MIX_CURRENT": [2, 2],
        "LODIV_BUF_CURRENT_RX": [4, 2],
        "MIX_CURRENT": [6, 2],
    }),
    layout!(Frend0 { "LODIV_BUF_CURRENT_TX": [2, 2], "PA_POWER": [5, 3] }),
    layout!(Fscal3 { "FSCAL3[7:6]": [0, 2], "CHP_CURR_CAL_EN": [2, 2], "FSCAL3[3:0]": [4, 4] }),
    layout!(Fscal2 { "VCO_CORE_H_EN": [2, 1], "FSCAL2": [3, 5] }),
    layout!(Fscal1 { "FSCAL1": [2, 6] }),
    layout!(Fscal0 { "FSCAL0": [1, 7] }),
    layout!(Rcctrl1 { "RCCTRL1": [1, 7] }),
    layout!(Rcctrl0 { "RCCTRL0": [1, 7] }),
    layout!(Fstest { "FSTEST": [0, 8] }),
    layout!(Ptest { "PTEST": [0, 8] }),
    layout!(Agctest { "AGCTEST": [0, 8] }),
    layout!(Test2 { "TEST2": [0, 8] }),
    layout!(Test1 { "TEST1": [0, 8] }),
    layout!(Test0 { "TEST0[7:2]": [0, 6], "VCO_SEL_CAL_EN": [6, 1], "TEST0[0]": [7, 1] }),
    layout!(Partnum { "PARTNUM": [0, 8] }),
    layout!(Version { "VERSION": [0, 8] }),
    layout!(Freqest { "FREQOFF_EST": [0, 8] }),
    RegisterLayout { register: Register::Lqi, fields: &[CRC_OK, LQI_EST] },
    layout!(Rssi { "RSSI": [0, 8] }),
    RegisterLayout { register: Register::Marcstate, fields: &[MARC_STATE] },
    layout!(Wortime1 { "TIME[15:8]": [0, 8] }),
    layout!(Wortime0 { "TIME[7:0]": [0, 8] }),
    layout!(Pktstatus {
        "CRC_OK": [0, 1],
        "CS": [1, 1],
        "PQT_REACHED": [2, 1],
        "CCA": [3, 1],
        "SFD": [4, 1],
        "GDO2": [5, 1],
        "GDO0": [7, 1],
    }),
    layout!(VcoVcDac { "VCO_VC_DAC": [0, 8] }),
    RegisterLayout { register: Register::Txbytes, fields: &[TXFIFO_UNDERFLOW, NUM_TXBYTES] },
    RegisterLayout { register: Register::Rxbytes, fields: &[RXFIFO_OVERFLOW, NUM_RXBYTES] },
    layout!(Rcctrl1Status { "RCCTRL1_STATUS": [1, 7] }),
    layout!(Rcctrl0Status { "RCCTRL0_STATUS": [1, 7] }),
];

/// Schema for the CC1101
pub const CC1101: RegisterSchema =
    RegisterSchema::new(LAYOUTS, ChipIdentity { partnum: 0x00, version: 0x14 }, 74);
