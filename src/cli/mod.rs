use anyhow::Result;

pub use args::{Arguments, CheckCommand, Command, CommonArgs};
pub use exit_status::ExitStatus;
pub use run::{CheckOutcome, CommandOutcome};

mod args;
mod exit_status;
mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let outcome = run::run(args)?;
    report::print(&outcome, verbose);

    Ok(exit_status(&outcome))
}

// Warnings alone don't fail the run; only reported errors do.
fn exit_status(outcome: &CommandOutcome) -> ExitStatus {
    match outcome {
        CommandOutcome::Check(check) if check.error_count() > 0 => ExitStatus::Failure,
        _ => ExitStatus::Success,
    }
}
