//! # Status and Extended-Status Classification
//!
//! NVDIMM method results lead with a 16-bit status code drawn from a fixed
//! table, and a 16-bit extended status whose meaning is defined per method.
//! The status table is shared by all methods; the acceptable extended status
//! is not, and always comes from the method's policy.

use crate::violation::{Expected, Observed, Rule, Violation};

/// Defined status codes of an NVDIMM method result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum NvdimmStatus {
    Success = 0,
    NotSupported = 1,
    NonExistingMemoryDevice = 2,
    InvalidInputParameters = 3,
    HardwareError = 4,
    RetrySuggested = 5,
    UnknownReason = 6,
}

/// Highest defined status code.
pub const STATUS_MAX: u16 = NvdimmStatus::UnknownReason as u16;

impl TryFrom<u16> for NvdimmStatus {
    type Error = u16;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Success,
            1 => Self::NotSupported,
            2 => Self::NonExistingMemoryDevice,
            3 => Self::InvalidInputParameters,
            4 => Self::HardwareError,
            5 => Self::RetrySuggested,
            6 => Self::UnknownReason,
            other => return Err(other),
        })
    }
}

/// A status outside `0..=6` is a violation reporting the observed code.
#[must_use]
pub fn check_status(method: &str, status: u16) -> Option<Violation> {
    match NvdimmStatus::try_from(status) {
        Ok(_) => None,
        Err(code) => Some(Violation::new(
            Rule::BadStatus,
            method,
            "Status",
            Expected::Domain {
                min: 0,
                max: u64::from(STATUS_MAX),
            },
            Observed::Value(u64::from(code)),
        )),
    }
}

/// Any extended status other than `expected` is a violation reporting both.
#[must_use]
pub fn check_extended_status(method: &str, observed: u16, expected: u16) -> Option<Violation> {
    (observed != expected).then(|| {
        Violation::new(
            Rule::BadExtendedStatus,
            method,
            "Extended Status",
            Expected::Value(u64::from(expected)),
            Observed::Value(u64::from(observed)),
        )
    })
}
