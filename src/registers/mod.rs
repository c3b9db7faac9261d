//! Typed register definitions for the CC1101
//! Taken from the CC1101 datasheet (SWRS061)

mod config;
mod status;

pub use config::*;
pub use status::*;
