use crate::models::{DailyRecord, Defect, DefectStatus, Severity, SeverityMix, Totals};

pub const MTTR_BASE_DAYS: f64 = 1.2;
pub const MTTR_FLOOR_DAYS: f64 = 0.3;
pub const DEFECT_ID_BASE: u64 = 1000;
pub const DEFAULT_DEFECT_LIMIT: usize = 8;

pub fn aggregate(series: &[DailyRecord]) -> Totals {
    let mut totals = series.iter().fold(Totals::default(), |mut acc, record| {
        acc.opened += u64::from(record.opened);
        acc.closed += u64::from(record.closed);
        acc.sev1 += u64::from(record.sev1);
        acc.sev2 += u64::from(record.sev2);
        acc.sev3 += u64::from(record.sev3);
        acc.tests += u64::from(record.tests);
        acc.passed += u64::from(record.passed);
        acc
    });

    totals.pass_rate = pass_rate(totals.passed, totals.tests);
    totals.mttr_days = mttr_days(totals.sev1, totals.sev2);
    totals
}

pub fn pass_rate(passed: u64, tests: u64) -> f64 {
    if tests > 0 {
        passed as f64 / tests as f64
    } else {
        0.0
    }
}

/// Severity-weighted estimate, not a measured resolution time.
pub fn mttr_days(sev1: u64, sev2: u64) -> f64 {
    (MTTR_BASE_DAYS + sev1 as f64 * 0.2 + sev2 as f64 * 0.05).max(MTTR_FLOOR_DAYS)
}

pub fn severity_mix(totals: &Totals) -> SeverityMix {
    if totals.opened == 0 {
        return SeverityMix::default();
    }
    let opened = totals.opened as f64;
    SeverityMix {
        sev1: totals.sev1 as f64 / opened,
        sev2: totals.sev2 as f64 / opened,
        sev3: totals.sev3 as f64 / opened,
    }
}

/// Newest defects first. Within a day the most severe come first and the
/// first `closed` of them count as resolved.
pub fn list_defects(series: &[DailyRecord], limit: usize) -> Vec<Defect> {
    let mut earlier_opened: u64 = series.iter().map(|record| u64::from(record.opened)).sum();
    let mut defects = Vec::new();

    for record in series.iter().rev() {
        earlier_opened -= u64::from(record.opened);
        let tiers = [
            (Severity::Sev1, record.sev1),
            (Severity::Sev2, record.sev2),
            (Severity::Sev3, record.sev3),
        ];

        let mut position: u64 = 0;
        for (severity, count) in tiers {
            for _ in 0..count {
                if defects.len() >= limit {
                    return defects;
                }
                let status = if position < u64::from(record.closed) {
                    DefectStatus::Resolved
                } else {
                    DefectStatus::Open
                };
                defects.push(Defect {
                    id: format!("QA-{}", DEFECT_ID_BASE + earlier_opened + position + 1),
                    reported_on: record.date,
                    severity,
                    status,
                });
                position += 1;
            }
        }
    }

    defects
}
