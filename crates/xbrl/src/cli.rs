use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Find restated 10-K filings in a quarter of SEC EDGAR XBRL data",
    long_about = None
)]
pub struct Cli {
    /// Financial year of documents you need in XXXX format (ex: 2024).
    #[arg(long)]
    pub year: Option<String>,

    /// Financial quarter in QTRX format (ex: QTR4).
    #[arg(long)]
    pub quarter: Option<String>,

    /// Email to attach to our requests (mandated by the SEC to track requests).
    #[arg(long)]
    pub email: Option<String>,

    /// Sets the level of tracing.
    ///
    /// Tracing replaces the terminal output (banners & progress bars) when provided.
    #[arg(short, long)]
    pub trace: Option<TraceLevel>,
}

impl Cli {
    /// The required flags, in order; `Err` names the first one missing.
    pub fn required(&self) -> Result<(&str, &str, &str), &'static str> {
        let year = self.year.as_deref().ok_or("year")?;
        let quarter = self.quarter.as_deref().ok_or("quarter")?;
        let email = self.email.as_deref().ok_or("email")?;
        Ok((year, quarter, email))
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
