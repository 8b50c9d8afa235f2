//! # ACPI Control-Method Result ABI
//!
//! Data model shared between whatever evaluates ACPI control methods and the
//! compliance checks that inspect their results.
//!
//! ## Overview
//!
//! Evaluating a control method (for example `_NCH` on an NVDIMM root device)
//! yields a typed ACPI object. Most device-specific methods return a *buffer*
//! whose bytes follow a fixed, packed, little-endian layout documented per
//! method name. This crate provides:
//!
//! * [`MethodResult`] / [`ReturnType`]: the evaluated object and its type tag.
//! * [`view::BufferView`]: a bounds-checked view over a result buffer. A view
//!   is only handed out once the buffer length matches the documented size,
//!   and field reads never go through raw pointer casts.
//! * [`FieldWidth`]: the byte width of a fixed-offset field.
//! * [`eisa::EisaId`]: the compressed EISA identifier used by integer `_HID`
//!   values.
//! * [`nvdimm`]: result layouts of the NVDIMM device methods.
//!
//! ```text
//! evaluate("_NCH") ─► MethodResult::Buffer(64 bytes)
//!                          │
//!                          ▼ BufferView::with_len(bytes, 64)
//!                     ┌────────┬──────────┬──────────┬─────────────┬──── ─ ─
//!                     │ status │ ext. st. │ valid.   │ health flags│ ...
//!                     │  u16   │   u16    │   u16    │    u32      │
//!                     └────────┴──────────┴──────────┴─────────────┴──── ─ ─
//!                       0        2          4          6
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

pub mod eisa;
pub mod nvdimm;
pub mod view;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Type tag of an evaluated ACPI object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReturnType {
    Integer,
    String,
    Buffer,
    Package,
    /// Any object type the checks have no use for (references, processors, ...).
    Other,
}

impl ReturnType {
    /// Lower-case ACPI object type name, as used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Buffer => "buffer",
            Self::Package => "package",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The object returned by a single control-method evaluation.
///
/// A result lives exactly as long as it takes to validate it; nothing keeps
/// it past the outcome it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodResult {
    Integer(u64),
    String(String),
    Buffer(Vec<u8>),
    Package(Vec<MethodResult>),
    Other,
}

impl MethodResult {
    #[must_use]
    pub const fn return_type(&self) -> ReturnType {
        match self {
            Self::Integer(_) => ReturnType::Integer,
            Self::String(_) => ReturnType::String,
            Self::Buffer(_) => ReturnType::Buffer,
            Self::Package(_) => ReturnType::Package,
            Self::Other => ReturnType::Other,
        }
    }

    /// The buffer bytes, if this is a buffer object.
    #[must_use]
    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Byte length; only buffers carry one.
    #[must_use]
    pub fn buffer_len(&self) -> Option<usize> {
        self.as_buffer().map(<[u8]>::len)
    }
}

/// Byte width of an unsigned field at a fixed buffer offset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldWidth {
    U8,
    U16,
    U32,
    U64,
}

impl FieldWidth {
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }

    #[must_use]
    pub const fn bits(self) -> u32 {
        // bytes() is at most 8
        #[allow(clippy::cast_possible_truncation)]
        let bytes = self.bytes() as u32;
        bytes * 8
    }

    /// All-ones mask covering the field.
    #[must_use]
    pub const fn mask(self) -> u64 {
        match self {
            Self::U64 => u64::MAX,
            _ => (1u64 << self.bits()) - 1,
        }
    }
}
