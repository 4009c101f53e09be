//! Shared output formatting for validation results.

use anyhow::Result;
use creative_lint_core::{Severity, Violation, ViolationDiagnostic};

use super::check::FileReport;
use crate::OutputFormat;

/// Print validation results in the specified format.
pub fn print(reports: &[FileReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(reports),
        OutputFormat::Json => return print_json(reports),
        OutputFormat::Compact => print_compact(reports),
        OutputFormat::Fancy => print_fancy(reports),
    }
    Ok(())
}

fn severity_indicator(severity: Severity) -> &'static str {
    match severity {
        Severity::Hard => "\x1b[31mhard\x1b[0m",
        Severity::Warning => "\x1b[33mwarning\x1b[0m",
    }
}

fn print_violation(v: &Violation) {
    println!(
        "{} {} at {}",
        v.code,
        v.rule_identifier(),
        v.element_id.as_deref().unwrap_or("<canvas>")
    );
    println!("  {}: {}", severity_indicator(v.severity), v.message);
    if let Some(m) = &v.measurement {
        println!("  = required {}, found {}", m.required, m.actual);
    }
    if let Some(fix) = &v.auto_fix {
        println!("  = fix: {}", fix.describe());
    }
    println!();
}

fn print_text(reports: &[FileReport]) {
    let mut hard = 0;
    let mut warnings = 0;

    for FileReport { file, report } in reports {
        println!("\x1b[1m{}\x1b[0m (score {}/100)", file.display(), report.score);
        for v in report.all() {
            print_violation(v);
        }
        let (h, w) = report.count_by_severity();
        hard += h;
        warnings += w;
    }

    let summary_color = if hard > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} hard fail(s), {} warning(s) in {} snapshot(s)\x1b[0m",
        summary_color,
        hard,
        warnings,
        reports.len()
    );
}

fn print_json(reports: &[FileReport]) -> Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    println!("{json}");
    Ok(())
}

fn print_compact(reports: &[FileReport]) {
    for FileReport { file, report } in reports {
        for v in report.all() {
            println!("{}: {v}", file.display());
        }
    }
}

fn print_fancy(reports: &[FileReport]) {
    for FileReport { file, report } in reports {
        println!("{} (score {}/100)", file.display(), report.score);
        for v in report.all() {
            let diagnostic = miette::Report::new(ViolationDiagnostic::from(v));
            println!("{diagnostic:?}");
        }
    }
}
