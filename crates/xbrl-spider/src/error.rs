use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Rejected command line values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid year \"{0}\", expected 4 digits (ex: 2024)")]
    Year(String),

    #[error("invalid quarter \"{0}\", expected one of QTR1, QTR2, QTR3, QTR4")]
    Quarter(String),

    #[error("an email is required to identify requests to the SEC")]
    Email,

    #[error("invalid archive url \"{0}\"")]
    ArchiveUrl(String),
}

/// Everything that can stop a scrape.
#[derive(Debug, Error)]
pub enum SpiderError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The quarterly index answered with anything other than 200.
    #[error("index request to {url} returned {status}")]
    IndexStatus { url: String, status: StatusCode },

    #[error("malformed index file: {0}")]
    Index(#[from] csv::Error),

    /// A filing download failed; the scan stops at `ordinal`.
    #[error("failed to download {url} (row {ordinal}): {source}")]
    Download {
        ordinal: usize,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write spreadsheet: {0}")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to style progress bar: {0}")]
    Template(#[from] indicatif::style::TemplateError),
}

impl SpiderError {
    /// One-line description for the terminal.
    pub fn operator_message(&self) -> String {
        match self {
            Self::Download { url, source, .. } => format!("Failed to download {url}: {source}"),
            other => format!("run failed: {other}"),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpiderError>;
