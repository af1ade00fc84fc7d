//! Errors surfaced by the build-script driver.
use std::{error::Error as StdError, fmt, path::PathBuf};

#[derive(Debug)]
pub enum CodegenError {
    /// Placement or reference violation in a source file.
    Diagnostic {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    /// No output directory configured and `OUT_DIR` unset.
    NoOutDir,
}

impl CodegenError {
    pub fn diagnostic(file: impl Into<PathBuf>, err: &syn::Error) -> Self {
        let start = err.span().start();
        CodegenError::Diagnostic {
            file: file.into(),
            line: start.line,
            column: start.column + 1,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodegenError::Diagnostic {
                file,
                line,
                column,
                message,
            } => write!(f, "{}:{line}:{column}: error: {message}", file.display()),
            CodegenError::NoOutDir => write!(f, "no output directory configured and OUT_DIR is not set"),
        }
    }
}

impl StdError for CodegenError {}
