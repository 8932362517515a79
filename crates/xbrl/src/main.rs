mod cli;
mod spider;

// remote imports
use clap::Parser;
use cli::{Cli, TraceLevel};
use colored::Colorize;
use tracing::{error, subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;
use xbrl_spider::Config;

const USAGE: &str = "xbrl --year 2024 --quarter QTR3 --email yourname@email.com";

////////////////////////////////////////////////////////////////////////////

// install the tracing subscriber at the requested level
fn preprocess(trace_level: Level) -> anyhow::Result<()> {
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .finish();
    subscriber::set_global_default(my_subscriber)?;
    Ok(())
}

fn title() {
    println!(
        "{bar}\n{name:^40}\n{bar}",
        bar = "#".repeat(40),
        name = "XBRL PARSER"
    );
    println!(
        "{}",
        "Restated 10-K filings from the SEC EDGAR archive".green()
    );
    println!("\n{}", "=".repeat(45));
}

fn usage(flag: &str) {
    println!(
        "{}",
        format!("No argument --{flag} supplied. Use the following syntax: \n").red()
    );
    println!("{}", format!("{USAGE}\n").green());
}

////////////////////////////////////////////////////////////////////////////

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // set the trace level
    if let Some(trace_level) = cli.trace {
        preprocess(match trace_level {
            TraceLevel::DEBUG => Level::DEBUG,
            TraceLevel::ERROR => Level::ERROR,
            TraceLevel::INFO => Level::INFO,
            TraceLevel::TRACE => Level::TRACE,
            TraceLevel::WARN => Level::WARN,
        })?;
    }
    trace!("command line input recorded: {cli:?}");

    // if no trace level provided, use tui
    let tui = cli.trace.is_none();
    if tui {
        title();
    }

    // a missing flag is reported, and nothing else runs
    let (year, quarter, email) = match cli.required() {
        Ok(required) => required,
        Err(flag) => {
            error!("no argument --{flag} supplied");
            usage(flag);
            return Ok(());
        }
    };

    let config = Config::new(year, quarter, email).map_err(|err| {
        error!("invalid arguments: {err}");
        if tui {
            eprintln!("{}", err.to_string().red());
        }
        err
    })?;

    spider::run(&config, tui).await
}
