/*!
 * Command-line interface for codescan
 */

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::LevelFilter;

use codescan::batch;
use codescan::config::{Args, Config};
use codescan::report::{ReportFormat, Reporter};

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    // Create configuration
    let config = Config::from_args(args);

    let report = match batch::run(&config) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
