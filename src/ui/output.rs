//! Output formatting and display logic for alive

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::constants::display;
use crate::core::error::Result;
use crate::core::types::{ProbeResult, Summary};
use crate::ui::color::{Colors, paint};

const BANNER: &str = r"
    _    _     _____     _______
   / \  | |   |_ _\ \   / / ____|
  / _ \ | |    | | \ \ / /|  _|
 / ___ \| |___ | |  \ V / | |___
/_/   \_\_____|___|  \_/  |_____|

        ~ URL health checker ~
";

const REPORT_TITLE: &str = "--- Alive URL Checker Report ---";
const REPORT_RULE_WIDTH: usize = 35;
const SUMMARY_RULE_WIDTH: usize = 50;

/// Truncate `text` to at most `max_len` characters, ending with `...` when cut
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let keep = max_len.saturating_sub(display::TRUNCATION_SUFFIX.len());
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str(display::TRUNCATION_SUFFIX);
    truncated
}

/// Format one result as a terminal or report block.
///
/// The first line is the status symbol, URL and message. Verbose mode adds an
/// indented `STATUS | TIME` line when either is known, and failed 404s with
/// suggestions get a numbered alternatives list.
pub fn format_result(result: &ProbeResult, verbose: bool, use_color: bool) -> String {
    let (symbol, color) = if result.success {
        (display::SUCCESS_EMOJI, Colors::BRIGHT_GREEN)
    } else {
        (display::ERROR_EMOJI, Colors::BRIGHT_RED)
    };
    let symbol = if use_color {
        format!("{color}{}{symbol}{}", Colors::BOLD, Colors::RESET)
    } else {
        symbol.to_string()
    };

    let mut block = format!("{symbol} {result}");

    if verbose {
        let mut details = Vec::with_capacity(2);
        if let Some(code) = result.status_code {
            details.push(format!("STATUS: {code}"));
        }
        if let Some(ms) = result.elapsed_ms {
            details.push(format!("TIME: {ms}ms"));
        }
        if !details.is_empty() {
            let line = format!("    {}", details.join(" | "));
            block.push('\n');
            block.push_str(&paint(&line, Colors::GRAY, use_color));
        }
    }

    if result.is_not_found() && !result.alternatives.is_empty() {
        let heading = format!("    {} Alternatives Found:", display::SEARCH_EMOJI);
        block.push_str("\n\n");
        block.push_str(&paint(&heading, Colors::BOLD, use_color));

        for (i, alternative) in result.alternatives.iter().enumerate() {
            let title = truncate(&alternative.title, display::MAX_ALTERNATIVE_LEN);
            let url = truncate(&alternative.url, display::MAX_ALTERNATIVE_LEN);
            // write! into a String cannot fail
            let _ = write!(
                block,
                "\n        {}. {title} ({})",
                i + 1,
                paint(&url, Colors::GRAY, use_color)
            );
        }
    }

    block
}

pub fn print_banner() {
    println!("{BANNER}");
}

/// Print the run header shown before any result in text mode
pub fn print_header(url_count: usize, workers: usize, live: bool) {
    println!("Checking {url_count} URLs with {workers} concurrent workers.");
    if live {
        println!("--- LIVE RESULTS ---");
    } else {
        println!("--- RESULTS ---");
    }
}

/// Format the final summary block
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "\n{}\n--- FINAL SUMMARY ---\nTotal checked: {}\nWorking URLs:  {}\nFailed URLs:   {}",
        "=".repeat(SUMMARY_RULE_WIDTH),
        summary.total,
        summary.succeeded,
        summary.failed
    )
}

pub fn print_summary(summary: &Summary) {
    println!("{}", format_summary(summary));
}

/// Render results as JSON, pretty-printed
pub fn format_json(results: &[ProbeResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Render the plain-text report written by `-o/--output`
pub fn render_report(results: &[ProbeResult], verbose: bool, timestamp: DateTime<Local>) -> String {
    let summary = Summary::from_results(results);
    let mut report = String::new();

    report.push_str(REPORT_TITLE);
    report.push('\n');
    report.push_str(&format!("Timestamp: {}\n", timestamp.format("%Y-%m-%d %H:%M:%S")));
    report.push_str(&format!(
        "Summary: {}/{} URLs are working\n",
        summary.succeeded, summary.total
    ));
    report.push_str(&"-".repeat(REPORT_RULE_WIDTH));
    report.push('\n');

    for result in results {
        report.push_str(&format_result(result, verbose, false));
        report.push('\n');
    }

    report
}

/// Write the plain-text report, stamped with the current local time
pub fn write_report<P: AsRef<Path>>(path: P, results: &[ProbeResult], verbose: bool) -> Result<()> {
    fs::write(path, render_report(results, verbose, Local::now()))?;
    Ok(())
}
