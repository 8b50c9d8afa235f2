//! # Method Test Orchestrator
//!
//! Runs a [`Suite`] against a [`Platform`]:
//!
//! ```text
//! INIT ──acquire──locate──┬── not found ──────────────► SKIP
//!                         ├── error ──────────────────► ABORTED
//!                         └── found ─► for each policy:
//!                                        INVOKE ─┬─ absent, optional  ─► SKIP-METHOD
//!                                                ├─ absent, mandatory ─► MISSING
//!                                                ├─ failed ───────────► INVOCATION ERROR
//!                                                └─ result ─► VALIDATE ─► PASS / FAIL
//! DEINIT (always, on every path above)
//! ```
//!
//! Method-level failures never stop the loop. Each method is evaluated
//! exactly once.

use crate::platform::{EnvironmentError, Invocation, InvocationError, LocateError, LocatedDevice, Platform};
use crate::policy::{MethodPolicy, Requirement};
use crate::report::Reporter;
use crate::validator::validate;
use crate::violation::ValidationOutcome;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

/// Ordered method policies for one device class.
#[derive(Debug, Copy, Clone)]
pub struct Suite {
    pub name: &'static str,
    pub description: &'static str,
    /// `_HID` of the device under test.
    pub device_class: &'static str,
    pub methods: &'static [MethodPolicy],
}

/// The device under test, created during INIT and handed to every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext<H> {
    pub handle: H,
    pub path: Option<String>,
}

impl<H> From<LocatedDevice<H>> for DeviceContext<H> {
    fn from(device: LocatedDevice<H>) -> Self {
        Self {
            handle: device.handle,
            path: device.path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodStatus {
    Passed,
    Failed(ValidationOutcome),
    /// Optional method not implemented by the device.
    Skipped,
    /// Mandatory method not implemented by the device.
    Missing,
    InvocationFailed(InvocationError),
}

impl MethodStatus {
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Failed(_) | Self::Missing | Self::InvocationFailed(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodReport {
    pub method: &'static str,
    pub description: &'static str,
    pub status: MethodStatus,
}

/// Why a suite could not run at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuiteAbort {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Locate(#[from] LocateError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteStatus {
    /// No device of the suite's class exists.
    Skipped,
    Aborted(SuiteAbort),
    Completed(Vec<MethodReport>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub suite: &'static str,
    pub device_class: &'static str,
    pub device_path: Option<String>,
    pub status: SuiteStatus,
}

/// Overall classification of a suite run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Verdict {
    Pass,
    Fail,
    Skip,
    Aborted,
}

/// Per-method counts of a completed run.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteReport {
    #[must_use]
    pub fn methods(&self) -> &[MethodReport] {
        match &self.status {
            SuiteStatus::Completed(methods) => methods,
            _ => &[],
        }
    }

    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodReport> {
        self.methods().iter().find(|m| m.method == name)
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.methods().iter().fold(Tally::default(), |mut t, m| {
            match m.status {
                MethodStatus::Passed => t.passed += 1,
                MethodStatus::Skipped => t.skipped += 1,
                _ => t.failed += 1,
            }
            t
        })
    }

    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match &self.status {
            SuiteStatus::Skipped => Verdict::Skip,
            SuiteStatus::Aborted(_) => Verdict::Aborted,
            SuiteStatus::Completed(methods) => {
                if methods.iter().any(|m| m.status.is_failure()) {
                    Verdict::Fail
                } else {
                    Verdict::Pass
                }
            }
        }
    }
}

/// Releases the environment when dropped, whichever way INIT or the method
/// loop was left.
struct EnvironmentGuard<'a, P: Platform> {
    platform: &'a mut P,
}

impl<'a, P: Platform> EnvironmentGuard<'a, P> {
    const fn new(platform: &'a mut P) -> Self {
        Self { platform }
    }
}

impl<P: Platform> Deref for EnvironmentGuard<'_, P> {
    type Target = P;
    fn deref(&self) -> &P {
        self.platform
    }
}

impl<P: Platform> DerefMut for EnvironmentGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.platform
    }
}

impl<P: Platform> Drop for EnvironmentGuard<'_, P> {
    fn drop(&mut self) {
        self.platform.release();
        log::debug!("environment released");
    }
}

/// Run every method of `suite` against the single device of its class.
#[must_use]
pub fn run_suite<P, R>(platform: &mut P, suite: &Suite, reporter: &mut R) -> SuiteReport
where
    P: Platform,
    R: Reporter + ?Sized,
{
    reporter.suite_started(suite);
    let report = run(platform, suite, reporter);
    reporter.suite_finished(&report);
    report
}

fn run<P, R>(platform: &mut P, suite: &Suite, reporter: &mut R) -> SuiteReport
where
    P: Platform,
    R: Reporter + ?Sized,
{
    let mut report = SuiteReport {
        suite: suite.name,
        device_class: suite.device_class,
        device_path: None,
        status: SuiteStatus::Skipped,
    };

    let mut env = EnvironmentGuard::new(platform);
    if let Err(e) = env.acquire() {
        report.status = SuiteStatus::Aborted(e.into());
        return report;
    }

    let ctx = match env.locate(suite.device_class) {
        Ok(Some(device)) => DeviceContext::from(device),
        Ok(None) => {
            log::debug!("no {} device", suite.device_class);
            return report;
        }
        Err(e) => {
            report.status = SuiteStatus::Aborted(e.into());
            return report;
        }
    };

    reporter.device_found(suite, ctx.path.as_deref());
    report.device_path.clone_from(&ctx.path);

    let mut methods = Vec::with_capacity(suite.methods.len());
    for policy in suite.methods {
        let method = run_method(&mut *env, &ctx, policy);
        reporter.method_finished(&method);
        methods.push(method);
    }

    report.status = SuiteStatus::Completed(methods);
    report
}

fn run_method<P: Platform>(
    platform: &mut P,
    ctx: &DeviceContext<P::Handle>,
    policy: &MethodPolicy,
) -> MethodReport {
    log::trace!("evaluating {}", policy.name);

    let status = match platform.invoke(&ctx.handle, policy.name) {
        Invocation::Returned(result) => {
            let outcome = validate(policy.name, &result, policy);
            if outcome.failed() {
                MethodStatus::Failed(outcome)
            } else {
                MethodStatus::Passed
            }
        }
        Invocation::Absent => match policy.requirement {
            Requirement::Optional => MethodStatus::Skipped,
            Requirement::Mandatory => MethodStatus::Missing,
        },
        Invocation::Failed(e) => MethodStatus::InvocationFailed(e),
    };

    MethodReport {
        method: policy.name,
        description: policy.description,
        status,
    }
}
