//! # Reporting
//!
//! The orchestrator streams progress into a [`Reporter`]. [`LogReporter`]
//! renders it through the `log` facade: one line per violation, one line per
//! method, and a summary per suite.

use crate::orchestrator::{MethodReport, MethodStatus, Suite, SuiteReport, SuiteStatus, Verdict};
use log::Level;

pub trait Reporter {
    fn suite_started(&mut self, _suite: &Suite) {}

    fn device_found(&mut self, _suite: &Suite, _path: Option<&str>) {}

    fn method_finished(&mut self, report: &MethodReport);

    fn suite_finished(&mut self, _report: &SuiteReport) {}
}

/// Log target used for all result lines.
pub const TARGET: &str = "compliance";

/// Renders results as log records under [`TARGET`].
#[derive(Debug, Default, Copy, Clone)]
pub struct LogReporter;

impl LogReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reporter for LogReporter {
    fn suite_started(&mut self, suite: &Suite) {
        log::info!(target: TARGET, "{}: {}", suite.name, suite.description);
    }

    fn device_found(&mut self, suite: &Suite, path: Option<&str>) {
        match path {
            Some(path) => log::info!(target: TARGET, "{} device: {path}", suite.device_class),
            None => log::info!(target: TARGET, "{} device found", suite.device_class),
        }
    }

    fn method_finished(&mut self, report: &MethodReport) {
        let name = report.method;
        log::info!(target: TARGET, "Test {name} ({}).", report.description);
        match &report.status {
            MethodStatus::Passed => {
                log::info!(target: TARGET, "PASSED: {name} correctly returned a sane result.");
            }
            MethodStatus::Failed(outcome) => {
                for v in outcome.violations() {
                    log::error!(target: TARGET, "FAILED [{}]: {v}", v.label());
                }
            }
            MethodStatus::Skipped => {
                log::warn!(target: TARGET, "SKIPPED: optional method {name} does not exist.");
            }
            MethodStatus::Missing => {
                log::error!(
                    target: TARGET,
                    "FAILED [MethodNotExist]: mandatory method {name} does not exist."
                );
            }
            MethodStatus::InvocationFailed(e) => {
                log::error!(target: TARGET, "FAILED [MethodExecution]: {name} {e}");
            }
        }
    }

    fn suite_finished(&mut self, report: &SuiteReport) {
        match &report.status {
            SuiteStatus::Skipped => log::warn!(
                target: TARGET,
                "{}: {} device does not exist, skipping test",
                report.suite,
                report.device_class
            ),
            SuiteStatus::Aborted(reason) => {
                log::error!(target: TARGET, "{}: aborted: {reason}", report.suite);
            }
            SuiteStatus::Completed(_) => {
                let t = report.tally();
                let level = if report.verdict() == Verdict::Pass {
                    Level::Info
                } else {
                    Level::Error
                };
                log::log!(
                    target: TARGET,
                    level,
                    "{}: {} passed, {} failed, {} skipped",
                    report.suite,
                    t.passed,
                    t.failed,
                    t.skipped
                );
            }
        }
    }
}
