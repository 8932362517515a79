use crate::config::Config;
use crate::error::{Result, SpiderError};
use crate::http::*;
use crate::{fs, tui};
use reqwest::header::{ACCEPT_ENCODING, HOST};
use reqwest::StatusCode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace};

/// Lines of preamble before the first listing (description, dates, column titles, rule).
pub const HEADER_LINES: usize = 10;

/// The only form type kept from the index.
pub const TARGET_FORM: &str = "10-K";

// fetch
// ----------------------------------------------------------------------------

/// Download the quarterly `xbrl.idx` to the run's temp directory.
///
/// Anything other than `200 OK` is an error; nothing is written in that case.
pub async fn fetch(http_client: &HttpClient, config: &Config, tui: bool) -> Result<PathBuf> {
    let url = config.index_url();
    let path = config.index_path();

    debug!("fetching EDGAR full index from {url}");
    let pb = tui::spinner(format!("downloading {url} ..."), tui)?;
    let outcome = save_index(http_client, config, url, &path).await;
    pb.finish_and_clear();

    let bytes = outcome?;
    debug!("{bytes} bytes of index written to {:?}", path);
    Ok(path)
}

async fn save_index(
    http_client: &HttpClient,
    config: &Config,
    url: String,
    path: &Path,
) -> Result<usize> {
    let mut request = http_client
        .get(&url)
        .header(ACCEPT_ENCODING, "gzip,deflate");
    if let Some(host) = config.archive_host() {
        request = request.header(HOST, host);
    }

    let response = request.send().await.map_err(|err| {
        error!("failed to fetch {url}, error({err})");
        err
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        error!("index request to {url} returned {status}");
        return Err(SpiderError::IndexStatus { url, status });
    }

    let body = response.bytes().await.map_err(|err| {
        error!("failed to read index body from {url}, error({err})");
        err
    })?;
    fs::write_file(path, &body).await.map_err(|err| {
        error!("failed to save index to {:?}, error({err})", path);
        err
    })?;

    Ok(body.len())
}

// parse
// ----------------------------------------------------------------------------

/// One listing of the index, in file column order.
#[derive(Debug, Deserialize)]
struct IndexRow {
    cik: String,
    company_name: String,
    form_type: String,
    date_filed: String,
    file_name: String,
}

/// A 10-K listing, keyed by its position among the other 10-Ks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filing {
    pub ordinal: usize,
    pub cik: String,
    pub company_name: String,
    pub form_type: String,
    pub date_filed: String,
    /// Path of the filing, relative to the archive root.
    pub file_name: String,
}

/// The filtered listings, in index order, with dense ordinals from 0.
#[derive(Clone, Debug, Default)]
pub struct FilingSet(Vec<Filing>);

impl FilingSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, ordinal: usize) -> Option<&Filing> {
        self.0.get(ordinal)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filing> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a FilingSet {
    type Item = &'a Filing;
    type IntoIter = std::slice::Iter<'a, Filing>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Read the pipe-delimited listing and keep the 10-K rows.
pub fn parse(text: &str) -> Result<FilingSet> {
    let body = text.splitn(HEADER_LINES + 1, '\n').nth(HEADER_LINES).unwrap_or("");

    // company names occasionally carry a stray `"`, so quoting stays off
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .quoting(false)
        .from_reader(body.as_bytes());

    let mut filings = Vec::new();
    for row in reader.deserialize::<IndexRow>() {
        let row = row.map_err(|err| {
            error!("failed to parse index row, error({err})");
            err
        })?;

        if row.form_type != TARGET_FORM {
            continue;
        }

        trace!("keeping {} filing of {}", row.form_type, row.company_name);
        filings.push(Filing {
            ordinal: filings.len(),
            cik: row.cik,
            company_name: row.company_name,
            form_type: row.form_type,
            date_filed: row.date_filed,
            file_name: row.file_name,
        });
    }

    Ok(FilingSet(filings))
}

/// Read a fetched index file from disk, see [`parse`].
pub async fn read(path: &Path, tui: bool) -> Result<FilingSet> {
    let text = fs::read_text(path).await?;
    let filings = parse(&text)?;

    info!("found a total of {} {TARGET_FORM} forms", filings.len());
    if tui {
        tui::status(format!(
            "Found a total of {} {TARGET_FORM} forms",
            filings.len()
        ));
    }

    Ok(filings)
}
