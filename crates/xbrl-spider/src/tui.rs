use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Section header, printed before each stage of a run.
pub(crate) fn banner(name: &str) {
    println!("{bar}\n{name:^40}\n{bar}", bar = "=".repeat(40));
}

/// A green status line.
pub(crate) fn status(msg: impl AsRef<str>) {
    println!("{}", msg.as_ref().green());
}

/// Progress over the filings being scanned; hidden outside of the tui.
pub(crate) fn scan_progress(len: usize, tui: bool) -> crate::Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new(len as u64).with_style(
        ProgressStyle::default_bar()
            .template(
                "{msg} {spinner:.magenta}\n\
                [{elapsed_precise:.magenta}] |{bar:40.cyan/blue}| {human_pos}/{human_len} filings \
                [Rate: {per_sec:.magenta}, ETA: {eta:.blue}]",
            )?
            .progress_chars("##-"),
    );
    pb.set_message("Digging through XBRL data");
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Spinner for a single blocking step, e.g. the index download.
pub(crate) fn spinner(msg: impl Into<String>, tui: bool) -> crate::Result<ProgressBar> {
    if !tui {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner()
        .with_message(msg.into())
        .with_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner:.magenta}")?,
        );
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
