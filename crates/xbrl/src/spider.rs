use colored::Colorize;
use tracing::{error, info};
use xbrl_spider::{edgar, Config};

/// Run the scrape for one year & quarter.
pub(crate) async fn run(config: &Config, tui: bool) -> anyhow::Result<()> {
    let time = std::time::Instant::now();

    let report = edgar::scrape(config, tui).await.map_err(|err| {
        error!("run failed: {err}");
        if tui {
            eprintln!("{}", err.operator_message().red());
        }
        err
    })?;

    info!(
        "spider finished collecting data, time elapsed: {:?}",
        time.elapsed()
    );

    if tui {
        println!(
            "{}",
            format!(
                "{} of {} 10-K forms written to {}",
                report.matches,
                report.filings,
                report.output.display()
            )
            .green()
        );
        println!("time elapsed: {:?}", time.elapsed());
    }

    Ok(())
}
