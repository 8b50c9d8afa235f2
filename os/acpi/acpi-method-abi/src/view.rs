//! # Checked Result-Buffer Views

use crate::FieldWidth;

/// The buffer does not have the documented length.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected a buffer of {expected} bytes, got {actual} bytes")]
pub struct LengthMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// Read-only view over a result buffer of known, validated length.
///
/// The only constructor checks the length first, so a view never exists for
/// a short or long buffer. Individual reads are still bounds-checked and
/// return `None` rather than reading past the end.
#[derive(Debug, Copy, Clone)]
pub struct BufferView<'a> {
    bytes: &'a [u8],
}

impl<'a> BufferView<'a> {
    /// Wrap `bytes` if and only if it is exactly `expected` bytes long.
    ///
    /// # Errors
    /// Returns [`LengthMismatch`] when the length differs.
    pub const fn with_len(bytes: &'a [u8], expected: usize) -> Result<Self, LengthMismatch> {
        if bytes.len() == expected {
            Ok(Self { bytes })
        } else {
            Err(LengthMismatch {
                expected,
                actual: bytes.len(),
            })
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Little-endian unsigned read of `width` bytes at `offset`.
    #[must_use]
    pub fn read(&self, offset: usize, width: FieldWidth) -> Option<u64> {
        let end = offset.checked_add(width.bytes())?;
        let s = self.bytes.get(offset..end)?;
        let mut le = [0u8; 8];
        le[..s.len()].copy_from_slice(s);
        Some(u64::from_le_bytes(le))
    }

    #[inline]
    #[must_use]
    pub fn u16_at(&self, offset: usize) -> Option<u16> {
        let end = offset.checked_add(2)?;
        let s = self.bytes.get(offset..end)?;
        Some(u16::from_le_bytes([s[0], s[1]]))
    }

    #[inline]
    #[must_use]
    pub fn u32_at(&self, offset: usize) -> Option<u32> {
        let end = offset.checked_add(4)?;
        let s = self.bytes.get(offset..end)?;
        Some(u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
    }
}
