//! Register bit-field codec
//!
//! Every CC1101 register packs one or more fields into a single byte. A
//! [`Field`] names such a range using MSB-first indexing:
//!
//! ```text
//! index  | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 |
//!         msb                         lsb
//! ```
//!
//! Index 0 is bit 7 of the byte, which is the reverse of the datasheet
//! numbering. All field tables in [`crate::schema`] are written against this
//! convention.
//!
//! The functions here are pure: they never touch the bus.

/// Error type for bit-field encoding and decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldError {
    /// Field index is not in 0..=7, width is not in 1..=8, or the field
    /// extends past the end of the byte
    InvalidFieldSpec,
    /// Value needs more bits than the field is wide
    ValueOutOfRange,
    /// A bit string contained something other than `0` and `1`
    InvalidBitString,
}

/// A named range of bits inside one register byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Field {
    /// Datasheet name of the field, e.g. `MOD_FORMAT`
    pub name: &'static str,
    /// Position of the most significant bit of the field (0 = MSB)
    pub index: u8,
    /// Number of bits (1..=8)
    pub width: u8,
}

impl Field {
    pub const fn new(name: &'static str, index: u8, width: u8) -> Self {
        Self { name, index, width }
    }

    /// Checks the field fits inside a single byte.
    pub const fn is_valid(&self) -> bool {
        self.index <= 7 && self.width >= 1 && self.width <= 8 && self.index + self.width <= 8
    }

    /// Mask of the bits covered by this field, in register position.
    ///
    /// Only meaningful for valid fields.
    pub const fn mask(&self) -> u8 {
        (u8::MAX >> (8 - self.width)) << self.shift()
    }

    const fn shift(&self) -> u8 {
        8 - (self.index + self.width)
    }

    fn check(&self) -> Result<(), FieldError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(FieldError::InvalidFieldSpec)
        }
    }
}

/// A value to store into a field
///
/// Multi-bit fields are often easier to express as the literal bit pattern
/// from the datasheet, so both forms are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Plain numeric value, right aligned
    Num(u8),
    /// Bit string such as `"011"`, left padded with zeros to the field width
    Bits(&'a str),
}

impl From<u8> for FieldValue<'_> {
    fn from(value: u8) -> Self {
        Self::Num(value)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        Self::Num(value as u8)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Bits(value)
    }
}

impl FieldValue<'_> {
    /// Resolves the value to a number that fits in `width` bits.
    fn resolve(self, width: u8) -> Result<u8, FieldError> {
        let value = match self {
            Self::Num(value) => value,
            Self::Bits(bits) => {
                if bits.len() > width as usize {
                    return Err(FieldError::ValueOutOfRange);
                }
                bits.bytes().try_fold(0u8, |acc, b| match b {
                    b'0' => Ok(acc << 1),
                    b'1' => Ok((acc << 1) | 1),
                    _ => Err(FieldError::InvalidBitString),
                })?
            }
        };

        if width < 8 && value >> width != 0 {
            return Err(FieldError::ValueOutOfRange);
        }
        Ok(value)
    }
}

/// Extracts the value of `field` from `byte`, right aligned.
pub fn extract(byte: u8, field: Field) -> Result<u8, FieldError> {
    field.check()?;
    Ok((byte & field.mask()) >> field.shift())
}

/// Returns `byte` with the bits of `field` replaced by `value`.
///
/// Bits outside the field are left untouched.
pub fn insert<'a>(byte: u8, field: Field, value: impl Into<FieldValue<'a>>) -> Result<u8, FieldError> {
    field.check()?;
    let value = value.into().resolve(field.width)?;
    Ok((byte & !field.mask()) | (value << field.shift()))
}
