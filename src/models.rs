use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};

pub const SUPPORTED_WINDOWS: [u32; 5] = [7, 14, 30, 60, 90];
pub const DEFAULT_WINDOW: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Core,
    Payments,
    Mobile,
    Platform,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::Core, Team::Payments, Team::Mobile, Team::Platform];
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::Core => "Core",
            Team::Payments => "Payments",
            Team::Mobile => "Mobile",
            Team::Platform => "Platform",
        };
        f.write_str(label)
    }
}

impl FromStr for Team {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(Team::Core),
            "payments" => Ok(Team::Payments),
            "mobile" => Ok(Team::Mobile),
            "platform" => Ok(Team::Platform),
            _ => Err(DashboardError::UnknownTeam(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Staging,
    Uat,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Environment::Staging => "Staging",
            Environment::Uat => "UAT",
            Environment::Production => "Production",
        };
        f.write_str(label)
    }
}

impl FromStr for Environment {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "staging" => Ok(Environment::Staging),
            "uat" => Ok(Environment::Uat),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(DashboardError::UnknownEnvironment(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub team: Team,
    pub environment: Environment,
}

/// What the user has picked in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub filters: Filters,
    pub days: u32,
}

impl Selection {
    pub fn new(team: Team, environment: Environment, days: u32) -> DashboardResult<Self> {
        Ok(Self {
            filters: Filters { team, environment },
            days: validate_window(days)?,
        })
    }
}

pub fn validate_window(days: u32) -> DashboardResult<u32> {
    if SUPPORTED_WINDOWS.contains(&days) {
        Ok(days)
    } else {
        Err(DashboardError::UnsupportedWindow(days))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub opened: u32,
    pub closed: u32,
    pub sev1: u32,
    pub sev2: u32,
    pub sev3: u32,
    pub tests: u32,
    pub passed: u32,
}

impl DailyRecord {
    pub fn pass_rate(&self) -> f64 {
        if self.tests == 0 {
            0.0
        } else {
            self.passed as f64 / self.tests as f64
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Totals {
    pub opened: u64,
    pub closed: u64,
    pub sev1: u64,
    pub sev2: u64,
    pub sev3: u64,
    pub tests: u64,
    pub passed: u64,
    pub pass_rate: f64,
    pub mttr_days: f64,
}

impl Totals {
    pub fn open_backlog(&self) -> u64 {
        self.opened.saturating_sub(self.closed)
    }
}

/// Share of each severity tier in the opened total, each in [0, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeverityMix {
    pub sev1: f64,
    pub sev2: f64,
    pub sev3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Sev1,
    Sev2,
    Sev3,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Sev1 => "Sev1",
            Severity::Sev2 => "Sev2",
            Severity::Sev3 => "Sev3",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DefectStatus {
    Open,
    Resolved,
}

impl fmt::Display for DefectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefectStatus::Open => f.write_str("Open"),
            DefectStatus::Resolved => f.write_str("Resolved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Defect {
    pub id: String,
    pub reported_on: NaiveDate,
    pub severity: Severity,
    pub status: DefectStatus,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub selection: Selection,
    pub series: Vec<DailyRecord>,
    pub totals: Totals,
    pub severity_mix: SeverityMix,
    pub defects: Vec<Defect>,
}
