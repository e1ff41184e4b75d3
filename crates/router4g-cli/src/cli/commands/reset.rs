//! `router4g reset` - Reset the WAN IP and wait for a new one.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use router4g::{Backoff, ResetAttempt, ResetStrategy};

use super::Context;
use crate::cli::args::ResetArgs;
use crate::output::OutputFormat;

/// Upper bound for a single poll delay with `--backoff`.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

pub async fn execute(ctx: Context, args: ResetArgs) -> Result<()> {
    let strategy = ResetStrategy::from(args.method);
    let mut controller = ctx.controller(args.timings())?;

    if args.backoff {
        let mut timings = controller.timings().clone();
        timings.restart.backoff = Backoff::Exponential { max: MAX_BACKOFF };
        timings.connection.backoff = Backoff::Exponential { max: MAX_BACKOFF };
        controller = controller.with_timings(timings);
    }

    let spinner = (ctx.output_format == OutputFormat::Pretty).then(|| {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!(
            "Resetting WAN IP of {} ({strategy})...",
            controller.client().base_url()
        ));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    });

    let report = controller.reset_ip(strategy).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if !ctx.output_format.print_structured(&report)? {
        for attempt in &report.attempts {
            print_attempt(attempt);
        }
    }

    match report.last() {
        Some(attempt) if attempt.is_success() => Ok(()),
        Some(attempt) => anyhow::bail!("IP reset failed: {}", attempt.result),
        None => anyhow::bail!("IP reset failed: no reset method was attempted"),
    }
}

fn print_attempt(attempt: &ResetAttempt) {
    let seconds = attempt.elapsed().num_milliseconds() as f64 / 1000.0;
    let previous = attempt.previous_ip.as_deref().unwrap_or("?");

    if attempt.is_success() {
        println!(
            "{} {}: {} -> {} ({seconds:.1}s, {} polls)",
            "✓".green().bold(),
            attempt.method.to_string().bold(),
            previous,
            attempt.current_ip.as_deref().unwrap_or("?").cyan().bold(),
            attempt.polls
        );
    } else {
        println!(
            "{} {}: {} ({seconds:.1}s)",
            "✗".red().bold(),
            attempt.method.to_string().bold(),
            attempt.result.to_string().red(),
        );
        if let Some(error) = &attempt.error {
            println!("    {}", error.dimmed());
        }
    }
}
