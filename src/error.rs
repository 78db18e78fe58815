use thiserror::Error;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Precondition failures raised before the pipeline runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("unknown team '{0}' (expected one of: core, payments, mobile, platform)")]
    UnknownTeam(String),

    #[error("unknown environment '{0}' (expected one of: staging, uat, production)")]
    UnknownEnvironment(String),

    #[error("unsupported day window {0} (expected one of: 7, 14, 30, 60, 90)")]
    UnsupportedWindow(u32),

    #[error("invalid seed {0}: must not be a multiple of 2147483647")]
    InvalidSeed(i64),

    #[error("date out of range: {days} days before {today}")]
    DateOutOfRange { today: chrono::NaiveDate, days: u32 },
}
