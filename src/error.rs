use crate::bits::FieldError;
use crate::params::InvalidSyncWord;
use crate::schema::SchemaError;

/// Error using the CC1101
///
/// `E` is the error type of the SPI device. Bus failures are passed through
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// SPI transfer failed
    Bus(E),
    /// Bit-field encoding or decoding failed
    Field(FieldError),
    /// Register or field missing from the schema
    Schema(SchemaError),
    /// Numeric address does not fit in a byte
    InvalidAddress(i32),
    /// Value outside the set accepted for a parameter
    UnsupportedParameterValue,
    /// Transmit called with nothing to send
    EmptyPayload,
    /// Payload does not fit the configured packet length
    PayloadTooLarge,
    /// Infinite packet length mode is not supported
    NotImplemented,
    /// PARTNUM / VERSION do not match the schema
    ChipIdentityMismatch { partnum: u8, version: u8 },
    /// The chip did not reach the expected state in time
    Timeout,
    /// Register content has no meaning in the enumerated decoding
    UnrecognizedValue(u8),
    /// Burst longer than one transfer can address
    InvalidLength,
}

impl<E> From<FieldError> for Error<E> {
    fn from(err: FieldError) -> Self {
        Error::Field(err)
    }
}

impl<E> From<SchemaError> for Error<E> {
    fn from(err: SchemaError) -> Self {
        Error::Schema(err)
    }
}

impl<E> From<InvalidSyncWord> for Error<E> {
    fn from(_: InvalidSyncWord) -> Self {
        Error::UnsupportedParameterValue
    }
}
