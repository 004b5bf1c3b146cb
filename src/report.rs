use std::fmt::Write;

use crate::stats::ImportReport;
use crate::utils::format_number;
use crate::Args;

pub fn print_report(report: &ImportReport, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", render_json(report)?);
    } else {
        print!("{}", render_text(report, args));
    }
    Ok(())
}

pub fn render_json(report: &ImportReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&report.domains)
}

pub fn render_text(report: &ImportReport, args: &Args) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "\n--- Email domains in {} ---", args.path.display());
    let _ = writeln!(
        out,
        "Unique domains: {}",
        format_number(report.domains.len() as u64)
    );
    let _ = writeln!(
        out,
        "Rows counted: {} of {} ({} skipped)",
        format_number(summary.rows_counted),
        format_number(summary.rows_read),
        format_number(summary.rows_skipped())
    );

    let top = match (args.top, args.bottom) {
        (None, None) => Some(report.domains.len()),
        (top, _) => top,
    };

    if let Some(top_count) = top {
        let _ = writeln!(
            out,
            "\nTop {} domains:",
            std::cmp::min(top_count, report.domains.len())
        );
        for entry in report.domains.iter().take(top_count) {
            let _ = writeln!(
                out,
                "- {}: {} customers",
                entry.domain(),
                format_number(entry.count())
            );
        }
    }

    if let Some(bottom_count) = args.bottom {
        let _ = writeln!(
            out,
            "\nBottom {} domains:",
            std::cmp::min(bottom_count, report.domains.len())
        );
        for entry in report.domains.iter().rev().take(bottom_count) {
            let _ = writeln!(
                out,
                "- {}: {} customers",
                entry.domain(),
                format_number(entry.count())
            );
        }
    }

    out
}
