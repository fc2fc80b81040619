use rustyline::error::ReadlineError;
use std::io;
use tac_compiler::CompileError;

/// Utility enum to package errors that can occur while running the command-line front end.
pub enum Error {
    /// The input could not be read.
    Io(io::Error),

    /// The line editor failed.
    Readline(ReadlineError),

    /// The input failed to compile.
    Compile(CompileError),

    /// The result could not be encoded as JSON.
    Json(serde_json::Error),
}

impl Error {
    /// Report this error to stderr. Compile errors are rendered against `processed`, the
    /// normalized input that their spans refer to.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    ///
    /// [`Report`]: https://docs.rs/ariadne/latest/ariadne/struct.Report.html
    pub fn report_to_stderr(&self, processed: &str) {
        match self {
            Self::Io(err) => eprintln!("error: {}", err),
            Self::Readline(err) => eprintln!("error: {}", err),
            Self::Compile(err) => {
                if let Err(err) = err.error().report_to_stderr("input", processed) {
                    eprintln!("error: {}", err);
                }
            },
            Self::Json(err) => eprintln!("error: {}", err),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Self::Compile(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
