//! # Generic Result Validator
//!
//! One routine validates every status-buffer method, driven entirely by its
//! [`MethodPolicy`]:
//!
//! 1. return type: on mismatch nothing else is checked;
//! 2. buffer size: on mismatch the result fails but no field is read;
//! 3. status, extended status and reserved bits are read through a
//!    [`BufferView`] and every violation is collected.

use crate::hid;
use crate::policy::{BufferPolicy, MethodPolicy, ReturnPolicy};
use crate::reserved_bits::has_set_bit;
use crate::status::{check_extended_status, check_status};
use crate::violation::{Expected, Observed, Rule, ValidationOutcome, Violation};
use acpi_method_abi::MethodResult;
use acpi_method_abi::view::BufferView;

/// Validate the result of evaluating `name` against `policy`.
///
/// Pure: the same inputs always produce the same outcome.
#[must_use]
pub fn validate(name: &str, result: &MethodResult, policy: &MethodPolicy) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::new();

    let ty = result.return_type();
    if !policy.returns.accepts(ty) {
        outcome.push(Violation::new(
            Rule::WrongReturnType,
            name,
            "Return Type",
            Expected::ReturnType(policy.returns.expected_types()),
            Observed::ReturnType(ty),
        ));
        return outcome;
    }

    match (&policy.returns, result) {
        (ReturnPolicy::StatusBuffer(layout), MethodResult::Buffer(bytes)) => {
            validate_buffer(name, bytes, layout, &mut outcome);
        }
        (ReturnPolicy::HardwareId, _) => hid::check_hardware_id(name, result, &mut outcome),
        // `accepts` admits only buffers for status-buffer policies.
        (ReturnPolicy::StatusBuffer(_), _) => {}
    }

    outcome
}

fn validate_buffer(name: &str, bytes: &[u8], layout: &BufferPolicy, outcome: &mut ValidationOutcome) {
    let view = match BufferView::with_len(bytes, layout.size) {
        Ok(view) => view,
        Err(mismatch) => {
            log::debug!("{name}: {mismatch}; skipping field checks");
            outcome.push(Violation::new(
                Rule::WrongBufferSize,
                name,
                "Buffer",
                Expected::Length(mismatch.expected),
                Observed::Length(mismatch.actual),
            ));
            return;
        }
    };

    match view.u16_at(layout.status_offset) {
        Some(status) => outcome.record(check_status(name, status)),
        None => log::warn!("{name}: status offset {} outside layout", layout.status_offset),
    }

    match view.u16_at(layout.extended_status_offset) {
        Some(ext) => outcome.record(check_extended_status(name, ext, layout.extended_status)),
        None => log::warn!(
            "{name}: extended status offset {} outside layout",
            layout.extended_status_offset
        ),
    }

    for field in layout.reserved {
        let Some(value) = view.read(field.offset, field.width) else {
            log::warn!("{name}: {} at offset {} outside layout", field.name, field.offset);
            continue;
        };

        for range in field.ranges {
            if has_set_bit(value, field.width, range.lo, range.hi) {
                outcome.push(Violation::new(
                    Rule::ReservedBitSet,
                    name,
                    field.name,
                    Expected::Clear(*range),
                    Observed::Value(value),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{ReservedField, Requirement};
    use crate::reserved_bits::BitRange;
    use acpi_method_abi::{FieldWidth, ReturnType};

    const FLAGS: [ReservedField; 2] = [
        ReservedField {
            name: "Validation Flags",
            offset: 4,
            width: FieldWidth::U16,
            ranges: &[BitRange::new(1, 15)],
        },
        ReservedField {
            name: "Health Status Flags",
            offset: 6,
            width: FieldWidth::U32,
            ranges: &[
                BitRange::new(2, 7),
                BitRange::new(11, 15),
                BitRange::new(19, 31),
            ],
        },
    ];

    const POLICY: MethodPolicy = MethodPolicy {
        name: "_TST",
        description: "test",
        requirement: Requirement::Mandatory,
        returns: ReturnPolicy::StatusBuffer(BufferPolicy::new(64, 0, &FLAGS)),
    };

    fn buffer(status: u16, ext: u16, validation: u16, health: u32) -> MethodResult {
        let mut b = vec![0u8; 64];
        b[0..2].copy_from_slice(&status.to_le_bytes());
        b[2..4].copy_from_slice(&ext.to_le_bytes());
        b[4..6].copy_from_slice(&validation.to_le_bytes());
        b[6..10].copy_from_slice(&health.to_le_bytes());
        MethodResult::Buffer(b)
    }

    #[test]
    fn clean_result_passes_and_is_idempotent() {
        let r = buffer(0, 0, 0x1, 0b11 | (0b111 << 8) | (0b111 << 16));
        let first = validate("_TST", &r, &POLICY);
        assert!(!first.failed());
        assert!(first.violations().is_empty());
        assert_eq!(validate("_TST", &r, &POLICY), first);
    }

    #[test]
    fn wrong_type_stops_all_checks() {
        let o = validate("_TST", &MethodResult::Integer(0xFFFF_FFFF), &POLICY);
        assert!(o.failed());
        assert_eq!(o.violations().len(), 1);
        let v = &o.violations()[0];
        assert_eq!(v.rule, Rule::WrongReturnType);
        assert_eq!(v.observed, Observed::ReturnType(ReturnType::Integer));
        assert_eq!(v.label(), "MethodReturnType");
    }

    #[test]
    fn wrong_size_skips_field_checks() {
        for len in [0, 4, 63, 65, 128] {
            // A bad status and set reserved bits that must not be looked at.
            let mut b = vec![0xFFu8; len];
            if len >= 2 {
                b[0] = 0x7F;
            }
            let o = validate("_TST", &MethodResult::Buffer(b), &POLICY);
            assert!(o.failed(), "len {len}");
            assert_eq!(o.violations().len(), 1, "len {len}");
            let v = &o.violations()[0];
            assert_eq!(v.rule, Rule::WrongBufferSize);
            assert_eq!(v.expected, Expected::Length(64));
            assert_eq!(v.observed, Observed::Length(len));
        }
    }

    #[test]
    fn single_reserved_range_violation() {
        let r = buffer(0x02, 0x0000, 0, 1 << 3);
        let o = validate("_TST", &r, &POLICY);
        assert!(o.failed());
        assert_eq!(o.violations().len(), 1);
        let v = &o.violations()[0];
        assert_eq!(v.rule, Rule::ReservedBitSet);
        assert_eq!(v.field, "Health Status Flags");
        assert_eq!(v.expected, Expected::Clear(BitRange::new(2, 7)));
        assert_eq!(v.observed, Observed::Value(1 << 3));
    }

    #[test]
    fn disjoint_ranges_report_independently() {
        let r = buffer(0, 0, 0, (1 << 4) | (1 << 20));
        let o = validate("_TST", &r, &POLICY);
        let ranges: Vec<_> = o
            .of_rule(Rule::ReservedBitSet)
            .map(|v| v.expected.clone())
            .collect();
        assert_eq!(
            ranges,
            vec![
                Expected::Clear(BitRange::new(2, 7)),
                Expected::Clear(BitRange::new(19, 31)),
            ]
        );
    }

    #[test]
    fn all_violations_are_collected_in_order() {
        let r = buffer(9, 3, 0x8000, 1 << 12);
        let o = validate("_TST", &r, &POLICY);
        let rules: Vec<_> = o.violations().iter().map(|v| v.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::BadStatus,
                Rule::BadExtendedStatus,
                Rule::ReservedBitSet,
                Rule::ReservedBitSet,
            ]
        );
        assert_eq!(o.violations()[0].observed, Observed::Value(9));
        assert_eq!(o.violations()[1].expected, Expected::Value(0));
        assert_eq!(o.violations()[1].observed, Observed::Value(3));
        assert_eq!(o.violations()[2].field, "Validation Flags");
        assert_eq!(o.violations()[3].field, "Health Status Flags");
    }

    #[test]
    fn layout_outside_buffer_is_skipped_not_panicking() {
        static FAR: [ReservedField; 1] = [ReservedField {
            name: "Far",
            offset: 62,
            width: FieldWidth::U32,
            ranges: &[BitRange::new(0, 31)],
        }];
        let policy = MethodPolicy {
            returns: ReturnPolicy::StatusBuffer(BufferPolicy::new(64, 0, &FAR)),
            ..POLICY
        };
        assert!(policy.check().is_err());
        let o = validate("_TST", &MethodResult::Buffer(vec![0xFF; 64]), &policy);
        // status 0xFFFF and ext status 0xFFFF are still reported
        assert_eq!(o.violations().len(), 2);
    }
}
