use crate::error::ConfigError;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Root of the EDGAR archive; index and filing paths are relative to it.
pub const ARCHIVE_URL: &str = "https://www.sec.gov/Archives/";

const TEMP_DIR: &str = "./temp";
const INDEX_FILE: &str = "xbrl.idx";

/// Parameters of a single run, threaded through every stage.
#[derive(Clone, Debug)]
pub struct Config {
    pub year: String,
    pub quarter: String,
    pub email: String,
    pub archive_url: Url,
    pub temp_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    /// Validate the command line inputs and fill in the default locations.
    pub fn new(
        year: impl Into<String>,
        quarter: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let year = year.into();
        if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::Year(year));
        }

        let quarter = quarter.into();
        if !matches!(quarter.as_str(), "QTR1" | "QTR2" | "QTR3" | "QTR4") {
            return Err(ConfigError::Quarter(quarter));
        }

        let email = email.into();
        if email.trim().is_empty() {
            return Err(ConfigError::Email);
        }

        let archive_url =
            Url::parse(ARCHIVE_URL).map_err(|_| ConfigError::ArchiveUrl(ARCHIVE_URL.into()))?;

        Ok(Self {
            year,
            quarter,
            email,
            archive_url,
            temp_dir: PathBuf::from(TEMP_DIR),
            output_dir: PathBuf::from("."),
        })
    }

    /// Point the run at another archive root, e.g. a mirror or a mock server.
    pub fn with_archive_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let mut url = url.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.archive_url = Url::parse(&url).map_err(|_| ConfigError::ArchiveUrl(url))?;
        Ok(self)
    }

    pub fn with_temp_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.temp_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    /// `.../edgar/full-index/{year}/{quarter}/xbrl.idx`
    pub fn index_url(&self) -> String {
        format!(
            "{}edgar/full-index/{}/{}/{INDEX_FILE}",
            self.archive_url, self.year, self.quarter
        )
    }

    /// Prefix a filing's relative path (as listed in the index) with the archive root.
    pub fn document_url(&self, relative: &str) -> String {
        format!("{}{}", self.archive_url, relative.trim_start_matches('/'))
    }

    /// Value for the `Host` header of the index request.
    pub fn archive_host(&self) -> Option<String> {
        let host = self.archive_url.host_str()?;
        Some(match self.archive_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }

    pub fn index_path(&self) -> PathBuf {
        self.temp_dir.join(INDEX_FILE)
    }

    /// `xbrl-{year}-{quarter}.xlsx`, inside the output directory.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("xbrl-{}-{}.xlsx", self.year, self.quarter))
    }
}
