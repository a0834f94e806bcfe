//! Command-line interface layer.

use anyhow::Result;

use crate::core::{CatalogError, ErrorKind};

mod args;
pub mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, CatalogArgs, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = match run::run(args) {
        Ok(result) => result,
        Err(err) if is_refusal(&err) => {
            report::print_error(&err);
            return Ok(ExitStatus::Failure);
        }
        Err(err) => return Err(err),
    };

    report::print(&result);
    Ok(ExitStatus::from_result(&result))
}

/// The catalog rejected the request, as opposed to failing to load or save.
fn is_refusal(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CatalogError>()
        .is_some_and(|e| matches!(e.kind(), ErrorKind::NotFound | ErrorKind::InvalidArgument))
}
