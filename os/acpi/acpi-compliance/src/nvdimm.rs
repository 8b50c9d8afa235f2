//! # NVDIMM Root Device Suite
//!
//! Policies for the device-specific methods of the NVDIMM root device
//! (`ACPI0012`). Every status-buffer method returns 64 bytes; all of them
//! expect an extended status of 0 except `_NIH`, which reports 1.

use crate::orchestrator::Suite;
use crate::policy::{BufferPolicy, MethodPolicy, Requirement, ReservedField, ReturnPolicy};
use crate::reserved_bits::BitRange;
use acpi_method_abi::FieldWidth;
use acpi_method_abi::nvdimm::{NVDIMM_ROOT_HID, RESULT_SIZE, nbs, nch, nic, nih};

/// Health flag words leave bits 2–7, 11–15 and 19–31 reserved.
const HEALTH_FLAG_RESERVED: &[BitRange] = &[
    BitRange::new(2, 7),
    BitRange::new(11, 15),
    BitRange::new(19, 31),
];

const NCH_RESERVED: &[ReservedField] = &[
    ReservedField {
        name: "Validation Flags",
        offset: nch::VALIDATION_FLAGS,
        width: FieldWidth::U16,
        ranges: &[BitRange::new(2, 15)],
    },
    ReservedField {
        name: "Health Status Flags",
        offset: nch::HEALTH_STATUS_FLAGS,
        width: FieldWidth::U32,
        ranges: HEALTH_FLAG_RESERVED,
    },
    ReservedField {
        name: "Health Status Attributes",
        offset: nch::HEALTH_STATUS_ATTRIBUTES,
        width: FieldWidth::U32,
        ranges: &[BitRange::new(1, 31)],
    },
];

const NBS_RESERVED: &[ReservedField] = &[ReservedField {
    name: "Validation Flags",
    offset: nbs::VALIDATION_FLAGS,
    width: FieldWidth::U16,
    ranges: &[BitRange::new(1, 15)],
}];

const NIC_RESERVED: &[ReservedField] = &[
    ReservedField {
        name: "Health Error Injection Capabilities",
        offset: nic::HEALTH_ERROR_INJECTION_CAPABILITIES,
        width: FieldWidth::U32,
        ranges: HEALTH_FLAG_RESERVED,
    },
    ReservedField {
        name: "Health Status Attributes Capabilities",
        offset: nic::HEALTH_STATUS_ATTRIBUTES_CAPABILITIES,
        width: FieldWidth::U32,
        ranges: &[BitRange::new(1, 31)],
    },
];

pub const NCH: MethodPolicy = MethodPolicy {
    name: nch::NAME,
    description: "NVDIMM Current Health Information",
    requirement: Requirement::Mandatory,
    returns: ReturnPolicy::StatusBuffer(BufferPolicy::new(RESULT_SIZE, 0, NCH_RESERVED)),
};

pub const NBS: MethodPolicy = MethodPolicy {
    name: nbs::NAME,
    description: "NVDIMM Boot Status",
    requirement: Requirement::Mandatory,
    returns: ReturnPolicy::StatusBuffer(BufferPolicy::new(RESULT_SIZE, 0, NBS_RESERVED)),
};

pub const NIC: MethodPolicy = MethodPolicy {
    name: nic::NAME,
    description: "NVDIMM Health Error Injection Capabilities",
    requirement: Requirement::Mandatory,
    returns: ReturnPolicy::StatusBuffer(BufferPolicy::new(RESULT_SIZE, 0, NIC_RESERVED)),
};

pub const NIH: MethodPolicy = MethodPolicy {
    name: nih::NAME,
    description: "NVDIMM Inject/Clear Health Errors",
    requirement: Requirement::Mandatory,
    returns: ReturnPolicy::StatusBuffer(BufferPolicy::new(RESULT_SIZE, 1, &[])),
};

/// Device identification objects are optional.
pub const HID: MethodPolicy = MethodPolicy {
    name: "_HID",
    description: "Hardware ID",
    requirement: Requirement::Optional,
    returns: ReturnPolicy::HardwareId,
};

pub static NVDIMM_METHODS: [MethodPolicy; 5] = [NCH, NBS, NIC, NIH, HID];

pub static NVDIMM_SUITE: Suite = Suite {
    name: "acpi_nvdimm",
    description: "NVDIMM device test",
    device_class: NVDIMM_ROOT_HID,
    methods: &NVDIMM_METHODS,
};
