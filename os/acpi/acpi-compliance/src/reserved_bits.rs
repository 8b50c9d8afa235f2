//! # Reserved-Bit Ranges

use acpi_method_abi::FieldWidth;
use core::fmt;

/// Inclusive bit range `[lo, hi]`; bit 0 is the least significant bit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BitRange {
    pub lo: u8,
    pub hi: u8,
}

impl BitRange {
    #[must_use]
    pub const fn new(lo: u8, hi: u8) -> Self {
        Self { lo, hi }
    }

    /// A range covering a single bit.
    #[must_use]
    pub const fn bit(bit: u8) -> Self {
        Self { lo: bit, hi: bit }
    }

    /// True if `lo <= hi` and the range lies within a field of `width`.
    #[must_use]
    pub const fn fits(self, width: FieldWidth) -> bool {
        self.lo <= self.hi && (self.hi as u32) < width.bits()
    }

    #[must_use]
    pub const fn mask(self) -> u64 {
        reserved_mask(self.lo, self.hi)
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.lo, self.hi)
    }
}

/// Mask with bits `lo..=hi` set, or `0` if the range is empty or exceeds 64 bits.
#[must_use]
pub const fn reserved_mask(lo: u8, hi: u8) -> u64 {
    if lo > hi || hi > 63 {
        return 0;
    }
    let span = (hi - lo + 1) as u32;
    let ones = if span == 64 {
        u64::MAX
    } else {
        (1u64 << span) - 1
    };
    ones << lo
}

/// True iff any bit in `lo..=hi` of the `width`-sized `value` is set.
///
/// Bits of `value` above `width` are ignored. A range that does not fit the
/// width (`lo > hi`, or `hi` past the top bit) never reports a set bit; such
/// ranges are rejected when a policy is checked.
#[must_use]
pub const fn has_set_bit(value: u64, width: FieldWidth, lo: u8, hi: u8) -> bool {
    if !BitRange::new(lo, hi).fits(width) {
        return false;
    }
    value & width.mask() & reserved_mask(lo, hi) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks() {
        assert_eq!(reserved_mask(0, 0), 0b1);
        assert_eq!(reserved_mask(2, 7), 0b1111_1100);
        assert_eq!(reserved_mask(11, 15), 0xF800);
        assert_eq!(reserved_mask(19, 31), 0xFFF8_0000);
        assert_eq!(reserved_mask(0, 63), u64::MAX);
        assert_eq!(reserved_mask(7, 2), 0);
        assert_eq!(reserved_mask(0, 64), 0);
    }

    #[test]
    fn detects_bits_inside_range_only() {
        let w = FieldWidth::U32;
        assert!(has_set_bit(1 << 3, w, 2, 7));
        assert!(has_set_bit(1 << 2, w, 2, 7));
        assert!(has_set_bit(1 << 7, w, 2, 7));
        assert!(!has_set_bit(1 << 1, w, 2, 7));
        assert!(!has_set_bit(1 << 8, w, 2, 7));
        assert!(!has_set_bit(0, w, 0, 31));
    }

    #[test]
    fn sixteen_bit_fields() {
        let w = FieldWidth::U16;
        assert!(has_set_bit(0x8000, w, 15, 15));
        assert!(has_set_bit(0x0004, w, 2, 15));
        assert!(!has_set_bit(0x0003, w, 2, 15));
    }

    #[test]
    fn ignores_bits_above_the_field_width() {
        // bit 16 does not exist in a u16 field
        assert!(!has_set_bit(1 << 16, FieldWidth::U16, 0, 15));
    }

    #[test]
    fn ranges_outside_the_width_never_match() {
        assert!(!has_set_bit(u64::MAX, FieldWidth::U16, 8, 16));
        assert!(!has_set_bit(u64::MAX, FieldWidth::U32, 9, 3));
        assert!(has_set_bit(u64::MAX, FieldWidth::U64, 63, 63));
    }

    #[test]
    fn range_display() {
        assert_eq!(BitRange::new(19, 31).to_string(), "[19..31]");
        assert_eq!(BitRange::bit(7), BitRange::new(7, 7));
    }
}
