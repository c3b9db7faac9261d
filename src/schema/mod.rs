//! Register field layouts
//!
//! A [`RegisterSchema`] is plain data: for each register it lists the
//! [`Field`]s packed into its byte, plus a handful of per-chip constants. The
//! radio engine takes a schema as configuration, so a different member of the
//! family can be driven by supplying a different table.
//!
//! Layouts are checked when the schema is built. [`RegisterSchema::new`] is a
//! `const fn`, so a malformed table placed in a `const` stops the build.

mod cc1101;

pub use cc1101::*;

use crate::address::Register;
use crate::bits::{self, Field};

/// Error type for schema lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchemaError {
    /// The schema has no layout for the requested register
    UnknownRegister,
    /// The register layout has no field with the requested name
    UnknownField,
}

/// Part number and version reported by a chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipIdentity {
    /// Content of the PARTNUM status register
    pub partnum: u8,
    /// Content of the VERSION status register
    pub version: u8,
}

/// Fields of a single register
#[derive(Debug, Clone, Copy)]
pub struct RegisterLayout {
    pub register: Register,
    pub fields: &'static [Field],
}

impl RegisterLayout {
    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Result<Field, SchemaError> {
        self.fields
            .iter()
            .copied()
            .find(|f| f.name == name)
            .ok_or(SchemaError::UnknownField)
    }
}

/// Register layouts and chip constants for one chip variant
#[derive(Debug, Clone, Copy)]
pub struct RegisterSchema {
    layouts: &'static [RegisterLayout],
    identity: ChipIdentity,
    rssi_offset: i16,
}

impl RegisterSchema {
    /// Builds a schema, validating every layout.
    ///
    /// # Panics
    /// If a field does not fit in a byte, two fields of one register
    /// overlap, a field name repeats within a register, or a register has
    /// more than one layout.
    pub const fn new(
        layouts: &'static [RegisterLayout],
        identity: ChipIdentity,
        rssi_offset: i16,
    ) -> Self {
        let mut i = 0;
        while i < layouts.len() {
            let layout = &layouts[i];

            let mut j = i + 1;
            while j < layouts.len() {
                if layouts[j].register.addr() == layout.register.addr() {
                    panic!("register has more than one layout");
                }
                j += 1;
            }

            let mut used = 0u8;
            let mut k = 0;
            while k < layout.fields.len() {
                let field = &layout.fields[k];
                if !field.is_valid() {
                    panic!("field does not fit in one byte");
                }
                if used & field.mask() != 0 {
                    panic!("fields overlap");
                }
                used |= field.mask();

                let mut m = k + 1;
                while m < layout.fields.len() {
                    if str_eq(field.name, layout.fields[m].name) {
                        panic!("duplicate field name");
                    }
                    m += 1;
                }
                k += 1;
            }
            i += 1;
        }

        Self { layouts, identity, rssi_offset }
    }

    /// Layout of `register`.
    pub fn layout_for(&self, register: Register) -> Result<&'static RegisterLayout, SchemaError> {
        let layouts: &'static [RegisterLayout] = self.layouts;
        layouts
            .iter()
            .find(|l| l.register == register)
            .ok_or(SchemaError::UnknownRegister)
    }

    /// Layout of the register called `name`.
    pub fn layout_named(&self, name: &str) -> Result<&'static RegisterLayout, SchemaError> {
        let layouts: &'static [RegisterLayout] = self.layouts;
        layouts
            .iter()
            .find(|l| l.register.name() == name)
            .ok_or(SchemaError::UnknownRegister)
    }

    /// The field called `field` in `register`.
    pub fn field_in(&self, register: Register, field: &str) -> Result<Field, SchemaError> {
        self.layout_for(register)?.field(field)
    }

    /// Every layout in the schema.
    pub fn layouts(&self) -> &'static [RegisterLayout] {
        self.layouts
    }

    /// Expected PARTNUM and VERSION.
    pub fn identity(&self) -> ChipIdentity {
        self.identity
    }

    /// Fixed RSSI offset in dB.
    pub fn rssi_offset(&self) -> i16 {
        self.rssi_offset
    }
}

impl Default for RegisterSchema {
    fn default() -> Self {
        CC1101
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

/// A register byte together with its layout
///
/// Decodes any field of the register by name.
#[derive(Debug, Clone, Copy)]
pub struct RegisterSnapshot<'s> {
    layout: &'s RegisterLayout,
    raw: u8,
}

impl<'s> RegisterSnapshot<'s> {
    pub fn new(layout: &'s RegisterLayout, raw: u8) -> Self {
        Self { layout, raw }
    }

    /// The register this byte was read from.
    pub fn register(&self) -> Register {
        self.layout.register
    }

    /// The raw register byte.
    pub fn raw(&self) -> u8 {
        self.raw
    }

    /// Value of the field called `name`.
    pub fn get(&self, name: &str) -> Result<u8, SchemaError> {
        let field = self.layout.field(name)?;
        // layouts are validated on construction
        Ok(bits::extract(self.raw, field).unwrap_or(0))
    }

    /// All fields with their decoded values, in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> + '_ {
        self.layout
            .fields
            .iter()
            .map(move |f| (f.name, bits::extract(self.raw, *f).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_fields() {
        let field = CC1101.field_in(Register::Mdmcfg2, "MOD_FORMAT").unwrap();
        assert_eq!((field.index, field.width), (1, 3));

        let field = CC1101.field_in(Register::Marcstate, "MARC_STATE").unwrap();
        assert_eq!((field.index, field.width), (3, 5));
    }

    #[test]
    fn unknown_field() {
        assert_eq!(
            CC1101.field_in(Register::Mdmcfg2, "CRC_EN"),
            Err(SchemaError::UnknownField)
        );
    }

    #[test]
    fn unknown_register() {
        const SPARSE: RegisterSchema = RegisterSchema::new(
            &[RegisterLayout {
                register: Register::Pktlen,
                fields: &[Field { name: "PACKET_LENGTH", index: 0, width: 8 }],
            }],
            ChipIdentity { partnum: 0, version: 0 },
            74,
        );

        assert!(SPARSE.layout_for(Register::Pktlen).is_ok());
        assert_eq!(
            SPARSE.layout_for(Register::Pktctrl0).map(|l| l.register),
            Err(SchemaError::UnknownRegister)
        );
        assert_eq!(
            SPARSE.layout_named("NOPE").map(|l| l.register),
            Err(SchemaError::UnknownRegister)
        );
    }

    #[test]
    fn every_register_has_a_layout() {
        for reg in Register::ALL {
            assert!(CC1101.layout_for(*reg).is_ok(), "{}", reg.name());
            assert_eq!(CC1101.layout_named(reg.name()).unwrap().register, *reg);
        }
    }

    #[test]
    #[should_panic(expected = "fields overlap")]
    fn overlapping_fields_are_rejected() {
        static BAD: &[RegisterLayout] = &[RegisterLayout {
            register: Register::Mdmcfg2,
            fields: &[
                Field { name: "A", index: 0, width: 4 },
                Field { name: "B", index: 3, width: 2 },
            ],
        }];
        RegisterSchema::new(BAD, ChipIdentity { partnum: 0, version: 0 }, 0);
    }

    #[test]
    #[should_panic(expected = "field does not fit in one byte")]
    fn oversized_fields_are_rejected() {
        static BAD: &[RegisterLayout] = &[RegisterLayout {
            register: Register::Mdmcfg2,
            fields: &[Field { name: "A", index: 4, width: 5 }],
        }];
        RegisterSchema::new(BAD, ChipIdentity { partnum: 0, version: 0 }, 0);
    }

    #[test]
    #[should_panic(expected = "duplicate field name")]
    fn duplicate_names_are_rejected() {
        static BAD: &[RegisterLayout] = &[RegisterLayout {
            register: Register::Mdmcfg2,
            fields: &[
                Field { name: "A", index: 0, width: 1 },
                Field { name: "A", index: 1, width: 1 },
            ],
        }];
        RegisterSchema::new(BAD, ChipIdentity { partnum: 0, version: 0 }, 0);
    }

    #[test]
    fn snapshot_decodes_all_fields() {
        let layout = CC1101.layout_for(Register::Pktctrl1).unwrap();
        // PQT = 3, CRC_AUTOFLUSH = 1, APPEND_STATUS = 1, ADR_CHK = 2
        let snapshot = RegisterSnapshot::new(layout, 0b011_0_1_1_10);

        assert_eq!(snapshot.get("PQT"), Ok(3));
        assert_eq!(snapshot.get("APPEND_STATUS"), Ok(1));
        assert_eq!(snapshot.get("ADR_CHK"), Ok(2));
        assert_eq!(snapshot.get("WHITE_DATA"), Err(SchemaError::UnknownField));

        let mut fields = snapshot.iter();
        assert_eq!(fields.next(), Some(("PQT", 3)));
        assert_eq!(fields.next(), Some(("CRC_AUTOFLUSH", 1)));
        assert_eq!(fields.next(), Some(("APPEND_STATUS", 1)));
        assert_eq!(fields.next(), Some(("ADR_CHK", 2)));
        assert_eq!(fields.next(), None);
    }
}
