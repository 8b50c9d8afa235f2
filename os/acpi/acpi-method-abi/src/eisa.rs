//! # Compressed EISA Identifiers
//!
//! Integer `_HID`/`_CID` values encode a seven character PNP ID such as
//! `PNP0A03` in 32 bits: three 5-bit vendor letters (`'@' + n`) followed by a
//! 16-bit product number stored as two bytes. The word is stored
//! little-endian, so the letters occupy the two low bytes.

use bitfield_struct::bitfield;
use core::fmt;

/// Compressed EISA ID as returned by an integer `_HID`.
///
/// | Bits   | Meaning |
/// |--------|---------|
/// | 0–1    | vendor letter 2, high bits 4:3 |
/// | 2–6    | vendor letter 1 |
/// | 7      | reserved, must be 0 |
/// | 8–12   | vendor letter 3 |
/// | 13–15  | vendor letter 2, low bits 2:0 |
/// | 16–23  | product number, high byte |
/// | 24–31  | product number, low byte |
#[bitfield(u32)]
#[derive(Eq, PartialEq)]
pub struct EisaId {
    #[bits(2)]
    vendor_2_high: u8,
    #[bits(5)]
    vendor_1: u8,
    /// Bit 7 — reserved.
    #[bits(1)]
    _reserved_7: u8,
    #[bits(5)]
    vendor_3: u8,
    #[bits(3)]
    vendor_2_low: u8,
    /// Product number, high byte (bits 23:16).
    pub product_high: u8,
    /// Product number, low byte (bits 31:24).
    pub product_low: u8,
}

/// Bit position of the reserved bit in an [`EisaId`].
pub const EISA_ID_RESERVED_BIT: u8 = 7;

impl EisaId {
    /// Build an ID from the raw `_HID` integer; only the low 32 bits are used.
    #[must_use]
    pub const fn from_integer(value: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self::from_bits(value as u32)
    }

    /// The three vendor letters as ASCII bytes (`'@'` + 5-bit code).
    #[must_use]
    pub const fn vendor(self) -> [u8; 3] {
        let second = (self.vendor_2_high() << 3) | self.vendor_2_low();
        [
            0x40 + self.vendor_1(),
            0x40 + second,
            0x40 + self.vendor_3(),
        ]
    }

    /// Product number as printed, i.e. `0x0A03` for `PNP0A03`.
    #[must_use]
    pub const fn product(self) -> u16 {
        u16::from_be_bytes([self.product_high(), self.product_low()])
    }

    /// True if all three vendor letters decode to `A`..=`Z`.
    #[must_use]
    pub const fn has_valid_vendor(self) -> bool {
        let v = self.vendor();
        v[0].is_ascii_uppercase() && v[1].is_ascii_uppercase() && v[2].is_ascii_uppercase()
    }
}

impl fmt::Display for EisaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vendor();
        write!(
            f,
            "{}{}{}{:04X}",
            char::from(a),
            char::from(b),
            char::from(c),
            self.product()
        )
    }
}
