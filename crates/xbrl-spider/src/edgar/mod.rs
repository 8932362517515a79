use crate::config::Config;
use crate::error::Result;
use crate::tui;
use std::path::PathBuf;
use tracing::{debug, info};

/// Download and filter the quarterly `xbrl.idx`.
pub mod index;

/// Search each listed filing for the restatement flag and its auditor.
pub mod scan;

/// The `.xlsx` output.
pub mod sheet;

pub use index::{Filing, FilingSet};
pub use scan::MatchRecord;

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub output: PathBuf,
    /// 10-K rows listed in the index.
    pub filings: usize,
    /// Rows written to the spreadsheet.
    pub matches: usize,
}

// 1. fetch xbrl.idx for the year & quarter
// 2. keep the 10-K rows
// 3. scan each filing for the restatement flag
// 4. write the matches to xbrl-{year}-{quarter}.xlsx

/// Scrape one quarter of EDGAR for restated 10-K filings.
pub async fn scrape(config: &Config, tui: bool) -> Result<Report> {
    let http_client = crate::build_client(config)?;

    // index
    let time = std::time::Instant::now();
    if tui {
        tui::banner("xbrl.idx");
        tui::status(format!(
            "Getting all XBRL Data for {} {}",
            config.year, config.quarter
        ));
    }
    let index_path = index::fetch(&http_client, config, tui).await?;
    debug!("index downloaded, {}", crate::time_elapsed(time));

    if tui {
        tui::status("Cleaning and Parsing all XBRL data");
    }
    let filings = index::read(&index_path, tui).await?;

    // filings
    let time = std::time::Instant::now();
    if tui {
        tui::banner("10-K filings");
    }
    let matches = scan::scan(&http_client, config, &filings, tui).await?;
    debug!("filings scanned, {}", crate::time_elapsed(time));

    // spreadsheet
    let output = config.output_path();
    let rows = sheet::write(&output, &matches)?;
    info!("{rows} restated filings written to {:?}", output);

    Ok(Report {
        output,
        filings: filings.len(),
        matches: rows,
    })
}
