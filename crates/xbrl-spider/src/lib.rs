pub mod config;
pub mod error;
pub mod fs;
mod tui;

/// Quarterly XBRL filings from the [SEC] EDGAR archive: the full index, a scan of every
/// 10-K it lists for the restatement flag, and the spreadsheet of matches.
///
/// [SEC]: https://www.sec.gov/search-filings/edgar-search-assistance/accessing-edgar-data
pub mod edgar;

pub use config::Config;
pub use error::{ConfigError, Result, SpiderError};

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use reqwest::Client as HttpClient;
}

/// Build the HTTP client shared by every request of a run.
///
/// The SEC requires each request to identify its sender, so the configured email becomes
/// the default `User-Agent`.
pub fn build_client(config: &Config) -> Result<http::HttpClient> {
    let client = reqwest::ClientBuilder::new()
        .user_agent(&config.email)
        .gzip(true)
        .deflate(true)
        .build()?;
    Ok(client)
}

/// Human readable elapsed time, for the tail of log lines.
pub fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:?}", time.elapsed())
}
