//! Code for printing the results of validation.
use crate::check::{Findings, Severity, Verdict};
use std::io::{self, Write};

/// Width of banners and rules
const WIDTH: usize = 80;

/// Write a section of numbered findings, if there are any
fn write_section<W: Write>(
    out: &mut W,
    findings: &Findings,
    severity: Severity,
    heading: &str,
) -> io::Result<()> {
    let count = findings.count(severity);
    if count == 0 {
        return Ok(());
    }

    writeln!(out, "\n{heading} ({count}):")?;
    writeln!(out, "{}", "-".repeat(WIDTH))?;
    for (number, message) in findings.messages(severity).enumerate() {
        writeln!(out, "{}. {message}", number + 1)?;
    }

    Ok(())
}

/// Write a report of the findings to `out`, returning the verdict.
///
/// # Arguments
///
/// * `out` - Where to write the report
/// * `findings` - The findings of all checks
/// * `show_info` - Whether to include informational findings
pub fn write_report<W: Write>(
    out: &mut W,
    findings: &Findings,
    show_info: bool,
) -> io::Result<Verdict> {
    let rule = "=".repeat(WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "VALIDATION RESULTS")?;
    writeln!(out, "{rule}")?;

    write_section(out, findings, Severity::Error, "❌ ERRORS")?;
    write_section(out, findings, Severity::Warning, "⚠ WARNINGS")?;
    if show_info {
        write_section(out, findings, Severity::Info, "✓ INFO")?;
    }

    let verdict = findings.verdict();
    writeln!(out, "\n{rule}")?;
    writeln!(out, "RESULT: {verdict}")?;
    writeln!(out, "{rule}")?;

    Ok(verdict)
}
