use acpi_compliance::nvdimm::NVDIMM_SUITE;
use acpi_compliance::orchestrator::SuiteAbort;
use acpi_compliance::platform::{EnvironmentError, InvocationError, LocateError};
use acpi_compliance::{
    DeviceLocator, Environment, Invocation, LocatedDevice, LogReporter, MethodInvoker,
    MethodReport, MethodStatus, Reporter, Rule, SuiteStatus, Verdict, run_suite,
};
use acpi_method_abi::MethodResult;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Handle(u32);

/// Scripted platform: one optional device with canned method responses.
#[derive(Default)]
struct MockPlatform {
    acquire_error: Option<&'static str>,
    locate_error: Option<&'static str>,
    device: Option<Handle>,
    responses: HashMap<&'static str, Invocation>,
    acquired: usize,
    released: usize,
    invoked: Vec<String>,
}

impl MockPlatform {
    fn with_device() -> Self {
        Self {
            device: Some(Handle(7)),
            ..Self::default()
        }
    }

    fn respond(mut self, method: &'static str, invocation: Invocation) -> Self {
        self.responses.insert(method, invocation);
        self
    }

    /// All four status methods return a clean result and `_HID` a valid ID.
    fn compliant() -> Self {
        let nih = {
            let mut b = vec![0u8; 64];
            b[2] = 1;
            b
        };
        Self::with_device()
            .respond("_NCH", Invocation::Returned(MethodResult::Buffer(vec![0; 64])))
            .respond("_NBS", Invocation::Returned(MethodResult::Buffer(vec![0; 64])))
            .respond("_NIC", Invocation::Returned(MethodResult::Buffer(vec![0; 64])))
            .respond("_NIH", Invocation::Returned(MethodResult::Buffer(nih)))
            .respond(
                "_HID",
                Invocation::Returned(MethodResult::String("ACPI0012".into())),
            )
    }
}

impl Environment for MockPlatform {
    fn acquire(&mut self) -> Result<(), EnvironmentError> {
        self.acquired += 1;
        match self.acquire_error {
            Some(e) => Err(EnvironmentError(e.into())),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

impl DeviceLocator for MockPlatform {
    type Handle = Handle;

    fn locate(&mut self, class_id: &str) -> Result<Option<LocatedDevice<Handle>>, LocateError> {
        assert_eq!(class_id, "ACPI0012");
        if let Some(e) = self.locate_error {
            return Err(LocateError(e.into()));
        }
        Ok(self.device.map(|handle| LocatedDevice {
            handle,
            path: Some("\\_SB_.NVDR".into()),
        }))
    }
}

impl MethodInvoker<Handle> for MockPlatform {
    fn invoke(&mut self, device: &Handle, method: &str) -> Invocation {
        assert_eq!(*device, Handle(7));
        self.invoked.push(method.to_string());
        self.responses
            .get(method)
            .cloned()
            .unwrap_or(Invocation::Absent)
    }
}

#[derive(Default)]
struct Recorder {
    started: usize,
    device_path: Option<String>,
    methods: Vec<String>,
    finished: usize,
}

impl Reporter for Recorder {
    fn suite_started(&mut self, _suite: &acpi_compliance::Suite) {
        self.started += 1;
    }

    fn device_found(&mut self, _suite: &acpi_compliance::Suite, path: Option<&str>) {
        self.device_path = path.map(str::to_string);
    }

    fn method_finished(&mut self, report: &MethodReport) {
        self.methods.push(report.method.to_string());
    }

    fn suite_finished(&mut self, _report: &acpi_compliance::SuiteReport) {
        self.finished += 1;
    }
}

#[test]
fn compliant_device_passes() {
    let mut platform = MockPlatform::compliant();
    let mut rec = Recorder::default();
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut rec);

    assert_eq!(report.verdict(), Verdict::Pass);
    assert_eq!(report.device_path.as_deref(), Some("\\_SB_.NVDR"));
    let tally = report.tally();
    assert_eq!((tally.passed, tally.failed, tally.skipped), (5, 0, 0));

    assert_eq!(rec.started, 1);
    assert_eq!(rec.finished, 1);
    assert_eq!(rec.device_path.as_deref(), Some("\\_SB_.NVDR"));
    assert_eq!(rec.methods, ["_NCH", "_NBS", "_NIC", "_NIH", "_HID"]);
    assert_eq!((platform.acquired, platform.released), (1, 1));
}

#[test]
fn every_method_is_invoked_exactly_once_in_order() {
    let mut platform = MockPlatform::compliant();
    let _ = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());
    assert_eq!(platform.invoked, ["_NCH", "_NBS", "_NIC", "_NIH", "_HID"]);
}

#[test]
fn missing_device_skips_the_suite() {
    let mut platform = MockPlatform::default();
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    assert_eq!(report.status, SuiteStatus::Skipped);
    assert_eq!(report.verdict(), Verdict::Skip);
    assert!(platform.invoked.is_empty());
    assert_eq!(platform.released, 1, "DEINIT runs on skip");
}

#[test]
fn environment_failure_aborts_and_still_releases() {
    let mut platform = MockPlatform {
        acquire_error: Some("no ACPI tables"),
        ..MockPlatform::compliant()
    };
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    assert!(matches!(
        report.status,
        SuiteStatus::Aborted(SuiteAbort::Environment(_))
    ));
    assert_eq!(report.verdict(), Verdict::Aborted);
    assert!(platform.invoked.is_empty());
    assert_eq!(platform.released, 1, "DEINIT runs after a partial INIT");
}

#[test]
fn locator_failure_aborts() {
    let mut platform = MockPlatform {
        locate_error: Some("namespace walk failed"),
        ..MockPlatform::compliant()
    };
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    assert!(matches!(
        report.status,
        SuiteStatus::Aborted(SuiteAbort::Locate(_))
    ));
    assert!(platform.invoked.is_empty());
    assert_eq!(platform.released, 1);
}

#[test]
fn missing_mandatory_method_does_not_stop_the_loop() {
    let mut platform = MockPlatform::compliant();
    platform.responses.remove("_NBS");
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    assert_eq!(report.verdict(), Verdict::Fail);
    assert_eq!(report.method("_NBS").unwrap().status, MethodStatus::Missing);
    for later in ["_NIC", "_NIH", "_HID"] {
        assert_eq!(report.method(later).unwrap().status, MethodStatus::Passed);
    }
    assert_eq!(platform.invoked.len(), 5);
}

#[test]
fn missing_optional_method_is_skipped() {
    let mut platform = MockPlatform::compliant();
    platform.responses.remove("_HID");
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    assert_eq!(report.method("_HID").unwrap().status, MethodStatus::Skipped);
    assert_eq!(report.verdict(), Verdict::Pass);
    assert_eq!(report.tally().skipped, 1);
}

#[test]
fn invocation_error_is_a_local_failure() {
    let mut platform = MockPlatform::compliant().respond(
        "_NCH",
        Invocation::Failed(InvocationError::Evaluation("AE_AML_NO_RETURN_VALUE".into())),
    );
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    assert!(matches!(
        report.method("_NCH").unwrap().status,
        MethodStatus::InvocationFailed(_)
    ));
    assert_eq!(report.method("_NBS").unwrap().status, MethodStatus::Passed);
    assert_eq!(report.verdict(), Verdict::Fail);
}

#[test]
fn malformed_result_fails_with_collected_violations() {
    let mut bad = vec![0u8; 64];
    bad[0] = 7; // status
    bad[4] = 0x04; // reserved Validation Flags bit 2
    let mut platform =
        MockPlatform::compliant().respond("_NCH", Invocation::Returned(MethodResult::Buffer(bad)));
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    let MethodStatus::Failed(outcome) = &report.method("_NCH").unwrap().status else {
        panic!("expected _NCH to fail");
    };
    let rules: Vec<_> = outcome.violations().iter().map(|v| v.rule).collect();
    assert_eq!(rules, [Rule::BadStatus, Rule::ReservedBitSet]);
}

#[test]
fn short_buffer_fails_without_field_checks() {
    let mut platform = MockPlatform::compliant()
        .respond("_NIC", Invocation::Returned(MethodResult::Buffer(vec![0xFF; 32])));
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    let MethodStatus::Failed(outcome) = &report.method("_NIC").unwrap().status else {
        panic!("expected _NIC to fail");
    };
    assert_eq!(outcome.violations().len(), 1);
    assert_eq!(outcome.violations()[0].rule, Rule::WrongBufferSize);
}

#[test]
fn wrong_return_type_fails_fast() {
    let mut platform =
        MockPlatform::compliant().respond("_NIH", Invocation::Returned(MethodResult::Integer(1)));
    let report = run_suite(&mut platform, &NVDIMM_SUITE, &mut LogReporter::new());

    let MethodStatus::Failed(outcome) = &report.method("_NIH").unwrap().status else {
        panic!("expected _NIH to fail");
    };
    assert_eq!(outcome.violations().len(), 1);
    assert_eq!(outcome.violations()[0].rule, Rule::WrongReturnType);
}
