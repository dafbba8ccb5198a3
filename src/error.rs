use std::path::PathBuf;

/// Problems with the content of a source table
///
/// Any of these aborts the run before an output file is touched.
#[derive(Debug, thiserror::Error)]
pub enum MalformedInput {
    #[error("The header is missing the required column `{column}`")]
    MissingColumn { column: &'static str },
    #[error("Line {line}, column `{column}`: `{value}` is not a valid order count")]
    InvalidCount {
        line: usize,
        column: String,
        value: String,
    },
    #[error("Line {line}, column `{column}`: `{value}` is not in the form {expected}")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Possible errors to occur while producing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Malformed(#[from] MalformedInput),
    #[error("Could not open `{}`", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn file_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileNotFound { path: path.into(), source }
    }
}
