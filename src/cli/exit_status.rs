use std::process::ExitCode;

/// Process exit status, following the usual linter convention: 0 for a
/// clean run, 1 when errors were reported, 2 when the tool itself failed
/// (bad config, unreadable project, internal error).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
