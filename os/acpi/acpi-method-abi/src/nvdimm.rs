//! # NVDIMM Device Method Layouts
//!
//! Every NVDIMM device-specific method returns a 64-byte buffer that begins
//! with a 16-bit status and a 16-bit extended status, followed by
//! method-specific fields and zero padding. Offsets are in bytes.

/// `_HID` of the NVDIMM root device.
pub const NVDIMM_ROOT_HID: &str = "ACPI0012";

/// Size of every NVDIMM method result buffer.
pub const RESULT_SIZE: usize = 64;

/// Common header of all NVDIMM method results.
pub const STATUS: usize = 0;
pub const EXTENDED_STATUS: usize = 2;

/// `_NCH`, NVDIMM Current Health Information.
pub mod nch {
    pub const NAME: &str = "_NCH";
    /// `u16`
    pub const VALIDATION_FLAGS: usize = 4;
    /// `u32`
    pub const HEALTH_STATUS_FLAGS: usize = 6;
    /// `u32`
    pub const HEALTH_STATUS_ATTRIBUTES: usize = 10;
}

/// `_NBS`, NVDIMM Boot Status.
pub mod nbs {
    pub const NAME: &str = "_NBS";
    /// `u16`
    pub const VALIDATION_FLAGS: usize = 4;
    /// `u32`
    pub const DATA_LOSS_COUNT: usize = 6;
}

/// `_NIC`, NVDIMM Health Error Injection Capabilities.
pub mod nic {
    pub const NAME: &str = "_NIC";
    /// `u32`
    pub const HEALTH_ERROR_INJECTION_CAPABILITIES: usize = 4;
    /// `u32`
    pub const HEALTH_STATUS_ATTRIBUTES_CAPABILITIES: usize = 8;
}

/// `_NIH`, NVDIMM Inject/Clear Health Errors.
pub mod nih {
    pub const NAME: &str = "_NIH";
}
