//! # Hardware ID (`_HID`) Checks
//!
//! A `_HID` evaluates either to a string or to a compressed EISA ID integer.
//! Valid strings are PNP IDs (`AAA####`) and ACPI IDs (`NNNN####`); the
//! trailing four characters are upper-case hexadecimal digits.

use crate::reserved_bits::{BitRange, has_set_bit};
use crate::violation::{Expected, Observed, Rule, ValidationOutcome, Violation};
use acpi_method_abi::eisa::{EISA_ID_RESERVED_BIT, EisaId};
use acpi_method_abi::{FieldWidth, MethodResult};
use alloc::string::String;

/// `AAA####`: three upper-case letters, four upper-case hex digits.
#[must_use]
pub fn is_pnp_id(id: &str) -> bool {
    let b = id.as_bytes();
    b.len() == 7 && b[..3].iter().all(u8::is_ascii_uppercase) && is_upper_hex(&b[3..])
}

/// `NNNN####`: four upper-case letters or digits, four upper-case hex digits.
#[must_use]
pub fn is_acpi_id(id: &str) -> bool {
    let b = id.as_bytes();
    b.len() == 8
        && b[..4]
            .iter()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        && is_upper_hex(&b[4..])
}

fn is_upper_hex(digits: &[u8]) -> bool {
    digits
        .iter()
        .all(|c| c.is_ascii_digit() || (b'A'..=b'F').contains(c))
}

/// Check an integer or string `_HID` result; other types are rejected earlier.
pub fn check_hardware_id(method: &str, result: &MethodResult, outcome: &mut ValidationOutcome) {
    match result {
        MethodResult::String(id) => {
            if !is_pnp_id(id) && !is_acpi_id(id) {
                outcome.push(Violation::new(
                    Rule::InvalidHardwareId,
                    method,
                    "Hardware ID",
                    Expected::Format("PNP or ACPI ID"),
                    Observed::Text(String::from(id.as_str())),
                ));
            } else {
                log::debug!("{method} returned \"{id}\"");
            }
        }
        MethodResult::Integer(raw) => {
            let id = EisaId::from_integer(*raw);
            if !id.has_valid_vendor() {
                outcome.push(Violation::new(
                    Rule::InvalidHardwareId,
                    method,
                    "Hardware ID",
                    Expected::Format("EISA ID"),
                    Observed::Value(*raw),
                ));
            }

            let bits = u64::from(id.into_bits());
            if has_set_bit(bits, FieldWidth::U32, EISA_ID_RESERVED_BIT, EISA_ID_RESERVED_BIT) {
                outcome.push(Violation::new(
                    Rule::ReservedBitSet,
                    method,
                    "EISA ID",
                    Expected::Clear(BitRange::bit(EISA_ID_RESERVED_BIT)),
                    Observed::Value(bits),
                ));
            }

            if !outcome.failed() {
                log::debug!("{method} returned EISA ID {id}");
            }
        }
        _ => {}
    }
}
