//! basedupe - base/search duplicate file finder
//!
//! Entry point for the basedupe CLI application.

use basedupe::{
    cli::{Cli, USAGE_HINT},
    error::{exit_code_for, ExitCode, StructuredError},
    logging::init_logging,
};
use clap::error::ErrorKind;
use clap::Parser;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                let _ = err.print();
                std::process::exit(ExitCode::Success.as_i32());
            }
            let code = ExitCode::InvalidArguments;
            if std::env::args_os().any(|a| a == "--json-errors") {
                let structured = StructuredError::from_message(err.to_string(), code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{json}");
                    std::process::exit(code.as_i32());
                }
            }
            let _ = err.print();
            eprintln!("{USAGE_HINT}");
            std::process::exit(code.as_i32());
        }
    };

    init_logging(cli.verbose, cli.quiet);
    let json_errors = cli.json_errors;

    match basedupe::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            let exit_code = exit_code_for(&err);
            log::debug!("Run failed: {err:?}");

            if json_errors {
                let structured = StructuredError::new(&err, exit_code);
                if let Ok(json) = serde_json::to_string_pretty(&structured) {
                    eprintln!("{json}");
                } else {
                    eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
                }
            } else {
                eprintln!("[{}] Error: {}", exit_code.code_prefix(), err);
            }

            std::process::exit(exit_code.as_i32());
        }
    }
}
