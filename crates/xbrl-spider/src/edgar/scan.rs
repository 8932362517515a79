use super::index::{Filing, FilingSet};
use crate::config::Config;
use crate::error::{Result, SpiderError};
use crate::fs::ScratchFile;
use crate::http::*;
use crate::tui;
use indicatif::ProgressBar;
use tracing::{debug, error, info, trace};

/// Present in a filing's XBRL when the statements restate a prior period.
pub const RESTATEMENT_MARKER: &str = "true</dei:DocumentFinStmtErrorCorrectionFlag>";

/// Closing tag that follows the auditor's name.
pub const AUDITOR_TAG: &str = "</dei:AuditorName";

/// How far (in characters) to look back from [`AUDITOR_TAG`] for the opening `>`.
pub const AUDITOR_WINDOW: usize = 50;

/// A filing carrying the restatement flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchRecord {
    pub filing: Filing,
    pub auditor: Option<String>,
}

// scan
// ----------------------------------------------------------------------------

/// Download every filing in `filings`, in order, and keep those carrying the
/// [`RESTATEMENT_MARKER`].
///
/// Downloads share one scratch file in the temp directory, which is removed before this
/// returns. The first failed download ends the scan with [`SpiderError::Download`]; matches
/// found before it are discarded.
pub async fn scan(
    http_client: &HttpClient,
    config: &Config,
    filings: &FilingSet,
    tui: bool,
) -> Result<Vec<MatchRecord>> {
    debug!("scanning {} filings for the restatement flag", filings.len());
    if tui {
        tui::status("Searching 10-K forms for matching tag values");
    }

    let scratch = ScratchFile::create_in(&config.temp_dir).await?;
    let pb = tui::scan_progress(filings.len(), tui)?;

    let outcome = scan_filings(http_client, config, filings, &scratch, &pb).await;
    pb.finish_and_clear();

    // the scratch file goes on every path; a failed scan keeps its own error
    let closed = scratch.close(tui);
    let matches = outcome?;
    closed?;

    info!(
        "{} of {} filings carry the restatement flag",
        matches.len(),
        filings.len()
    );
    Ok(matches)
}

async fn scan_filings(
    http_client: &HttpClient,
    config: &Config,
    filings: &FilingSet,
    scratch: &ScratchFile,
    pb: &ProgressBar,
) -> Result<Vec<MatchRecord>> {
    let len = filings.len();
    let mut matches = Vec::new();

    for filing in filings {
        pb.println(format!("Processing file: {}/{len}", filing.ordinal));
        let url = config.document_url(&filing.file_name);

        trace!("downloading [{}] {} from {url}", filing.cik, filing.company_name);
        let body = download(http_client, &url).await.map_err(|source| {
            error!("failed to download {url}, error({source})");
            SpiderError::Download {
                ordinal: filing.ordinal,
                url: url.clone(),
                source: source.without_url(),
            }
        })?;

        scratch.overwrite(&body).await?;
        let text = scratch.read_text().await?;

        match inspect(filing, &text) {
            Some(record) => {
                debug!(
                    "restatement flag found for [{}] {}, auditor: {:?}",
                    filing.cik, filing.company_name, record.auditor
                );
                matches.push(record);
            }
            None => trace!("no restatement flag in {url}"),
        }

        pb.inc(1);
    }

    Ok(matches)
}

/// GET a filing; any non-2xx status is an error.
async fn download(http_client: &HttpClient, url: &str) -> reqwest::Result<Vec<u8>> {
    let body = http_client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(body.to_vec())
}

// inspect
// ----------------------------------------------------------------------------

/// Check one filing's text; `None` when the restatement marker is absent.
pub fn inspect(filing: &Filing, text: &str) -> Option<MatchRecord> {
    if !text.contains(RESTATEMENT_MARKER) {
        return None;
    }

    Some(MatchRecord {
        filing: filing.clone(),
        auditor: extract_auditor(text),
    })
}

/// Pull the auditor's name out of `...>Name</dei:AuditorName`.
///
/// Only the first closing tag is considered, and the opening `>` must sit within
/// [`AUDITOR_WINDOW`] characters of it. Surrounding whitespace is trimmed; a blank name
/// counts as absent.
pub fn extract_auditor(text: &str) -> Option<String> {
    let end = text.find(AUDITOR_TAG)?;
    let head = &text[..end];

    // byte offset of the AUDITOR_WINDOW-th character before the tag
    let start = head
        .char_indices()
        .rev()
        .nth(AUDITOR_WINDOW - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let open = start + head[start..].rfind('>')?;

    let name = head[open + 1..].trim();
    (!name.is_empty()).then(|| name.to_string())
}
