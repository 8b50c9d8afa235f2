//! # Platform Collaborators
//!
//! The compliance engine does not interpret AML and does not know how a
//! method gets evaluated. It talks to the platform through three traits:
//!
//! * [`Environment`]: bring the method-evaluation environment up and down.
//! * [`DeviceLocator`]: find the one device instance of a class.
//! * [`MethodInvoker`]: evaluate a named method on that device.
//!
//! [`Platform`] is implemented for anything providing all three.

use acpi_method_abi::MethodResult;
use alloc::string::String;

/// The evaluation environment could not be brought up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot initialize the method evaluation environment: {0}")]
pub struct EnvironmentError(pub String);

/// Device enumeration itself failed (as opposed to finding nothing).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot enumerate devices: {0}")]
pub struct LocateError(pub String);

/// The evaluation mechanism failed to produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
    #[error("evaluation failed: {0}")]
    Evaluation(String),
    #[error("returned an object that cannot be represented")]
    Unrepresentable,
}

/// Outcome of one method evaluation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Returned(MethodResult),
    /// The device does not implement the method.
    Absent,
    Failed(InvocationError),
}

/// A located device: an opaque handle plus its namespace path, if known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedDevice<H> {
    pub handle: H,
    pub path: Option<String>,
}

pub trait Environment {
    /// # Errors
    /// Fails if the environment cannot be brought up. [`Environment::release`]
    /// is still called afterwards, so partially acquired resources can be freed.
    fn acquire(&mut self) -> Result<(), EnvironmentError>;

    /// Release whatever [`Environment::acquire`] set up. Called exactly once per run.
    fn release(&mut self);
}

pub trait DeviceLocator {
    type Handle;

    /// Find the first device whose hardware ID is `class_id`.
    ///
    /// # Errors
    /// Fails only if enumeration is impossible; a missing device is `Ok(None)`.
    fn locate(&mut self, class_id: &str) -> Result<Option<LocatedDevice<Self::Handle>>, LocateError>;
}

pub trait MethodInvoker<H> {
    /// Evaluate `method` on `device` once, without arguments.
    fn invoke(&mut self, device: &H, method: &str) -> Invocation;
}

pub trait Platform:
    Environment + DeviceLocator + MethodInvoker<<Self as DeviceLocator>::Handle>
{
}

impl<T> Platform for T where
    T: Environment + DeviceLocator + MethodInvoker<<T as DeviceLocator>::Handle>
{
}
