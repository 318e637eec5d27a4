//! `resbundle` command-line entry point.
use std::process::ExitCode;

use clap::Parser;

use resbundle_cli::error::ResbundleError;
use resbundle_cli::{cli, commands, logging};

#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let log_file = args.global.log_file.as_deref();
    if let Err(e) = logging::init_subscriber(args.verbose, args.command.name(), log_file) {
        eprintln!("resbundle: cannot open log file: {e}");
        return ExitCode::FAILURE;
    }
    let log = logging::Logger::new(log_file);

    let result = match &args.command {
        cli::Command::Embed(opts) => commands::embed::run(&args.global, opts, &log),
        cli::Command::Disttar(opts) => commands::disttar::run(&args.global, opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    };

    let warnings = log.warning_count();
    if warnings > 0 {
        log.info(&format!("finished with {warnings} warning(s)"));
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log.error(&format!("{err:#}"));
            if let Some(path) = log.log_path() {
                log.info(&format!("details in {}", path.display()));
            }
            let code = err
                .downcast_ref::<ResbundleError>()
                .map_or(1, ResbundleError::exit_code);
            ExitCode::from(code)
        }
    }
}
