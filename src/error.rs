use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The caller handed over something that does not name a file.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The file exists but does not follow the article layout.
    #[error("invalid article file {path}: {issue}")]
    Format { path: String, issue: FormatIssue },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn format(path: impl Into<String>, issue: FormatIssue) -> Self {
        Error::Format {
            path: path.into(),
            issue,
        }
    }

    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// The structural problem, if this is a format error.
    pub fn format_issue(&self) -> Option<FormatIssue> {
        match self {
            Error::Format { issue, .. } => Some(*issue),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatIssue {
    #[error("the first line must be exactly `<!--` to open the metadata block")]
    MissingOpenFence,
    #[error("the closing `-->` of the metadata block was not found")]
    MissingCloseFence,
    #[error("there is no content after the metadata block")]
    NoContent,
}
