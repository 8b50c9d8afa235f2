//! # Method Policy Descriptors
//!
//! A [`MethodPolicy`] declares everything the generic validator needs to know
//! about one control method: whether the device must implement it, what it
//! returns, and, for fixed-layout status buffers, where the status words sit,
//! which extended status is acceptable, and which bits are reserved.
//!
//! Policies are plain data, built as `const` tables per device class (see
//! [`crate::nvdimm`]).

use crate::reserved_bits::BitRange;
use acpi_method_abi::{FieldWidth, ReturnType};

/// Whether a device is required to implement a method.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Requirement {
    Mandatory,
    Optional,
}

/// A fixed-offset field whose reserved bits must read as zero.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReservedField {
    pub name: &'static str,
    pub offset: usize,
    pub width: FieldWidth,
    /// Checked independently, in order.
    pub ranges: &'static [BitRange],
}

/// Layout and expectations of a fixed-size status buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BufferPolicy {
    pub size: usize,
    pub status_offset: usize,
    pub extended_status_offset: usize,
    /// Method specific; never derived from other methods.
    pub extended_status: u16,
    pub reserved: &'static [ReservedField],
}

/// What a method is expected to return.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReturnPolicy {
    /// A fixed-size buffer with status, extended status and reserved fields.
    StatusBuffer(BufferPolicy),
    /// A hardware ID: compressed EISA integer or PNP/ACPI ID string.
    HardwareId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MethodPolicy {
    pub name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
    pub returns: ReturnPolicy,
}

/// A policy that cannot be applied safely to a result of its own declared size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("{method}: field {field} at offset {offset} ({width} bytes) exceeds the {size}-byte buffer")]
    FieldOutOfBounds {
        method: &'static str,
        field: &'static str,
        offset: usize,
        width: usize,
        size: usize,
    },
    #[error("{method}: field {field} declares reserved bits {range} outside its {bits}-bit width")]
    RangeOutOfWidth {
        method: &'static str,
        field: &'static str,
        range: BitRange,
        bits: u32,
    },
}

impl ReturnPolicy {
    #[must_use]
    pub const fn accepts(&self, ty: ReturnType) -> bool {
        match self {
            Self::StatusBuffer(_) => matches!(ty, ReturnType::Buffer),
            Self::HardwareId => matches!(ty, ReturnType::Integer | ReturnType::String),
        }
    }

    /// The accepted types, as printed in diagnostics.
    #[must_use]
    pub const fn expected_types(&self) -> &'static str {
        match self {
            Self::StatusBuffer(_) => "buffer",
            Self::HardwareId => "integer or string",
        }
    }
}

impl BufferPolicy {
    /// Standard layout: status at offset 0, extended status at offset 2.
    #[must_use]
    pub const fn new(size: usize, extended_status: u16, reserved: &'static [ReservedField]) -> Self {
        Self {
            size,
            status_offset: 0,
            extended_status_offset: 2,
            extended_status,
            reserved,
        }
    }
}

impl MethodPolicy {
    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        matches!(self.requirement, Requirement::Mandatory)
    }

    /// Check that every declared field and bit range fits the declared layout.
    ///
    /// # Errors
    /// Returns the first field or range that does not fit.
    pub fn check(&self) -> Result<(), PolicyError> {
        let ReturnPolicy::StatusBuffer(buffer) = &self.returns else {
            return Ok(());
        };

        let status_words = [
            ("Status", buffer.status_offset),
            ("Extended Status", buffer.extended_status_offset),
        ];
        for (field, offset) in status_words {
            self.check_bounds(buffer.size, field, offset, FieldWidth::U16)?;
        }

        for field in buffer.reserved {
            self.check_bounds(buffer.size, field.name, field.offset, field.width)?;
            if let Some(range) = field.ranges.iter().find(|r| !r.fits(field.width)) {
                return Err(PolicyError::RangeOutOfWidth {
                    method: self.name,
                    field: field.name,
                    range: *range,
                    bits: field.width.bits(),
                });
            }
        }
        Ok(())
    }

    fn check_bounds(
        &self,
        size: usize,
        field: &'static str,
        offset: usize,
        width: FieldWidth,
    ) -> Result<(), PolicyError> {
        match offset.checked_add(width.bytes()) {
            Some(end) if end <= size => Ok(()),
            _ => Err(PolicyError::FieldOutOfBounds {
                method: self.name,
                field,
                offset,
                width: width.bytes(),
                size,
            }),
        }
    }
}
