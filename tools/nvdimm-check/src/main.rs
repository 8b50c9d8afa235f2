//! Runs the NVDIMM control-method suite against a captured method-result dump.

mod dump;
mod logger;

use acpi_compliance::nvdimm::NVDIMM_SUITE;
use acpi_compliance::{LogReporter, Suite, Verdict, run_suite};
use clap::Parser;
use dump::DumpPlatform;
use log::LevelFilter;
use logger::StderrLogger;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_ABORTED: u8 = 2;
const EXIT_SKIP: u8 = 77;

#[derive(Debug, Parser)]
#[command(name = "nvdimm-check", version, about = "NVDIMM ACPI control-method compliance check")]
struct Cli {
    /// Directory of captured method results, one sub-directory per device node
    #[arg(long, value_name = "DIR", required_unless_present = "list")]
    dump: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,

    /// Print the suite's method table and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = StderrLogger::new(cli.log_level).init() {
        eprintln!("failed to install logger: {e}");
        return ExitCode::from(EXIT_ABORTED);
    }

    let suite = &NVDIMM_SUITE;
    if cli.list {
        print_methods(suite);
        return ExitCode::SUCCESS;
    }

    for policy in suite.methods {
        if let Err(e) = policy.check() {
            log::error!("malformed suite table: {e}");
            return ExitCode::from(EXIT_ABORTED);
        }
    }

    let Some(root) = cli.dump else {
        log::error!("no dump directory given");
        return ExitCode::from(EXIT_ABORTED);
    };

    let mut platform = DumpPlatform::new(root);
    let report = run_suite(&mut platform, suite, &mut LogReporter::new());
    exit_code(report.verdict())
}

fn print_methods(suite: &Suite) {
    println!("{} ({}): {}", suite.name, suite.device_class, suite.description);
    for policy in suite.methods {
        let requirement = if policy.is_mandatory() {
            "mandatory"
        } else {
            "optional"
        };
        println!(
            "  {:<5} {:<9} {:<20} {}",
            policy.name,
            requirement,
            policy.returns.expected_types(),
            policy.description
        );
    }
}

fn exit_code(verdict: Verdict) -> ExitCode {
    ExitCode::from(exit_status(verdict))
}

const fn exit_status(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Fail => 1,
        Verdict::Aborted => EXIT_ABORTED,
        Verdict::Skip => EXIT_SKIP,
    }
}
