//! # ACPI Control-Method Compliance
//!
//! Checks that firmware-provided ACPI control methods return what the ACPI
//! specification says they must: the right object type, the right fixed
//! buffer size, status codes from the defined table, the method-specific
//! extended status, and zero in every reserved bit.
//!
//! ## Overview
//!
//! ```text
//! Suite (policy table) ──► orchestrator::run_suite
//!                              │  Environment::acquire
//!                              │  DeviceLocator::locate(class)
//!                              │  ┌ for each MethodPolicy ─────────────────┐
//!                              │  │ MethodInvoker::invoke(handle, name)    │
//!                              │  │ validator::validate(result, policy)    │
//!                              │  │ Reporter::method_finished(report)      │
//!                              │  └────────────────────────────────────────┘
//!                              │  Environment::release   (always)
//!                              ▼
//!                         SuiteReport ──► verdict()
//! ```
//!
//! ## Key Components
//!
//! ### Reserved bits ([`reserved_bits`])
//! [`reserved_bits::has_set_bit`] scans one inclusive bit range of a 16- or
//! 32-bit field. Callers check each declared range separately so that
//! violations in disjoint ranges are reported independently.
//!
//! ### Policies ([`policy`])
//! A [`policy::MethodPolicy`] describes one method declaratively. The
//! [`nvdimm`] module holds the table for the NVDIMM root device.
//!
//! ### Validation ([`validator`])
//! [`validator::validate`] applies a policy to one result and collects every
//! [`violation::Violation`] in a single pass. A wrong type ends validation; a
//! wrong size fails the result without reading any field.
//!
//! ### Orchestration ([`orchestrator`]) and platform seams ([`platform`])
//! Device discovery and method evaluation are supplied by the caller through
//! the [`platform::Platform`] traits; the environment is released on every
//! exit path.
//!
//! ## Usage
//! ```rust
//! use acpi_compliance::nvdimm::NCH;
//! use acpi_compliance::validator::validate;
//! use acpi_method_abi::MethodResult;
//!
//! let mut buffer = vec![0u8; 64];
//! buffer[6] = 1 << 3; // reserved Health Status Flags bit 3
//! let outcome = validate("_NCH", &MethodResult::Buffer(buffer), &NCH);
//! assert!(outcome.failed());
//! assert_eq!(outcome.violations()[0].label(), "_NCHReservedBitsNonZero");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]

extern crate alloc;

pub mod hid;
pub mod nvdimm;
pub mod orchestrator;
pub mod platform;
pub mod policy;
pub mod report;
pub mod reserved_bits;
pub mod status;
pub mod validator;
pub mod violation;

pub use orchestrator::{MethodReport, MethodStatus, Suite, SuiteReport, SuiteStatus, Verdict, run_suite};
pub use platform::{DeviceLocator, Environment, Invocation, LocatedDevice, MethodInvoker, Platform};
pub use report::{LogReporter, Reporter};
pub use validator::validate;
pub use violation::{Rule, ValidationOutcome, Violation};
