//! # Violations and Outcomes

use crate::reserved_bits::BitRange;
use acpi_method_abi::ReturnType;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Which compliance rule a result broke.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Rule {
    WrongReturnType,
    WrongBufferSize,
    BadStatus,
    BadExtendedStatus,
    ReservedBitSet,
    InvalidHardwareId,
}

/// What the rule required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    /// Human readable type set, e.g. `"buffer"` or `"integer or string"`.
    ReturnType(&'static str),
    Length(usize),
    /// Inclusive value domain.
    Domain { min: u64, max: u64 },
    Value(u64),
    /// The bit range must be all zero.
    Clear(BitRange),
    /// A textual format, e.g. `"PNP or ACPI ID"`.
    Format(&'static str),
}

/// What the result actually contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observed {
    ReturnType(ReturnType),
    Length(usize),
    Value(u64),
    Text(String),
}

/// One rule violation in one method result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub method: String,
    pub field: &'static str,
    pub expected: Expected,
    pub observed: Observed,
}

impl Violation {
    #[must_use]
    pub fn new(
        rule: Rule,
        method: &str,
        field: &'static str,
        expected: Expected,
        observed: Observed,
    ) -> Self {
        Self {
            rule,
            method: String::from(method),
            field,
            expected,
            observed,
        }
    }

    /// Short machine-greppable label of the failure, e.g. `MethodBadStatus`
    /// or `_NCHReservedBitsNonZero`.
    ///
    /// A set reserved bit 7 in an integer `_HID` is labelled
    /// `_HIDReservedBitsNonZero`, not fwts' `MethodHIDInvalidInteger`; the
    /// latter is kept for EISA IDs whose vendor letters do not decode.
    #[must_use]
    pub fn label(&self) -> String {
        match self.rule {
            Rule::WrongReturnType => String::from("MethodReturnType"),
            Rule::WrongBufferSize => String::from("MethodBufferSize"),
            Rule::BadStatus => String::from("MethodBadStatus"),
            Rule::BadExtendedStatus => String::from("MethodBadExtendedStatus"),
            Rule::ReservedBitSet => format!("{}ReservedBitsNonZero", self.method),
            Rule::InvalidHardwareId => match self.observed {
                Observed::Value(_) => String::from("MethodHIDInvalidInteger"),
                _ => String::from("MethodHIDInvalidString"),
            },
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnType(t) | Self::Format(t) => f.write_str(t),
            Self::Length(n) => write!(f, "{n} elements"),
            Self::Domain { min, max } => write!(f, "{min}..{max}"),
            Self::Value(v) => write!(f, "{v:x}"),
            Self::Clear(r) => write!(f, "bits {r} clear"),
        }
    }
}

impl fmt::Display for Observed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReturnType(t) => write!(f, "{t}"),
            Self::Length(n) => write!(f, "{n} elements"),
            Self::Value(v) => write!(f, "{v:x}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.method;
        match (&self.rule, &self.expected, &self.observed) {
            (Rule::WrongBufferSize, Expected::Length(e), Observed::Length(o)) => write!(
                f,
                "{m} should return a buffer of {e} elements, got {o} elements instead"
            ),
            (Rule::ReservedBitSet, Expected::Clear(r), Observed::Value(v)) => write!(
                f,
                "{m} {} Bits [{}..{}] must be zero, got 0x{v:x} instead",
                self.field, r.hi, r.lo
            ),
            (Rule::WrongReturnType, e, o) => {
                write!(f, "{m} did not return {e}, got {o} instead")
            }
            (_, e, o) => write!(f, "{m}: Expected {} to be {e}, got {o}", self.field),
        }
    }
}

/// Result of validating one method result: every violation found, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    violations: Vec<Violation>,
}

impl ValidationOutcome {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// True iff at least one violation was recorded.
    #[must_use]
    pub fn failed(&self) -> bool {
        !self.violations.is_empty()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Record `violation` if there is one.
    pub fn record(&mut self, violation: Option<Violation>) {
        if let Some(v) = violation {
            self.push(v);
        }
    }

    /// Violations of the given rule.
    pub fn of_rule(&self, rule: Rule) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.rule == rule)
    }
}
