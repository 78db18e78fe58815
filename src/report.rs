use std::fmt::Write;

use crate::models::{DailyRecord, Defect, SeverityMix, Snapshot, Totals};

const BAR_WIDTH: usize = 20;

pub fn render_tiles(totals: &Totals) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "- Opened: {}", totals.opened);
    let _ = writeln!(output, "- Closed: {}", totals.closed);
    let _ = writeln!(output, "- Open backlog: {}", totals.open_backlog());
    let _ = writeln!(output, "- Pass rate: {:.1}%", totals.pass_rate * 100.0);
    let _ = writeln!(output, "- MTTR: {:.2} days", totals.mttr_days);
    output
}

/// Tiles headed by the selection they were computed for.
pub fn render_view(label: &str, snapshot: &Snapshot) -> String {
    let selection = &snapshot.selection;
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{label} ({}, {}, {} days):",
        selection.filters.team, selection.filters.environment, selection.days
    );
    output.push_str(&render_tiles(&snapshot.totals));
    output
}

pub fn render_severity_mix(mix: &SeverityMix) -> String {
    let mut output = String::new();
    for (label, share) in [("Sev1", mix.sev1), ("Sev2", mix.sev2), ("Sev3", mix.sev3)] {
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            output,
            "- {label} {:<width$} {:.1}%",
            "#".repeat(filled.min(BAR_WIDTH)),
            share * 100.0,
            width = BAR_WIDTH
        );
    }
    output
}

pub fn render_series(series: &[DailyRecord]) -> String {
    let mut output = String::new();
    if series.is_empty() {
        let _ = writeln!(output, "No days in this window.");
        return output;
    }

    let _ = writeln!(output, "| Date | Opened | Closed | Sev1 | Sev2 | Sev3 | Tests | Passed | Pass rate |");
    let _ = writeln!(output, "|---|---:|---:|---:|---:|---:|---:|---:|---:|");
    for record in series {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {:.1}% |",
            record.date,
            record.opened,
            record.closed,
            record.sev1,
            record.sev2,
            record.sev3,
            record.tests,
            record.passed,
            record.pass_rate() * 100.0
        );
    }
    output
}

pub fn render_defects(defects: &[Defect]) -> String {
    let mut output = String::new();
    if defects.is_empty() {
        let _ = writeln!(output, "No defects reported in this window.");
        return output;
    }

    let _ = writeln!(output, "| ID | Reported | Severity | Status |");
    let _ = writeln!(output, "|---|---|---|---|");
    for defect in defects {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            defect.id, defect.reported_on, defect.severity, defect.status
        );
    }
    output
}

pub fn build_report(snapshot: &Snapshot) -> String {
    let selection = &snapshot.selection;
    let mut output = String::new();

    let _ = writeln!(output, "# QA Metrics Dashboard");
    let _ = writeln!(
        output,
        "{} team, {} environment, last {} days (mock data)",
        selection.filters.team, selection.filters.environment, selection.days
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Key Figures");
    output.push_str(&render_tiles(&snapshot.totals));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Severity Mix");
    output.push_str(&render_severity_mix(&snapshot.severity_mix));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Daily Trend");
    output.push_str(&render_series(&snapshot.series));
    let _ = writeln!(output);
    let _ = writeln!(output, "## Recent Defects");
    output.push_str(&render_defects(&snapshot.defects));

    output
}
