/// Which of the sink's outputs a message is meant for.
///
/// Severity never influences whether a message is throttled, only where it
/// ends up once it passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    /// General output, what a console calls `log`.
    Log,
    Warn,
    Error,
}

impl Severity {
    /// Warnings and errors go to the error stream of a console.
    pub fn is_diagnostic(self) -> bool {
        matches!(self, Severity::Warn | Severity::Error)
    }
}
