use chrono::NaiveDate;
use tracing::{debug, info};

use crate::aggregate::{self, DEFAULT_DEFECT_LIMIT};
use crate::error::DashboardResult;
use crate::models::{Environment, Selection, Snapshot, Team};
use crate::rng::SequenceGenerator;
use crate::series;

/// Runs the whole pipeline for one selection against `generator`.
pub fn compute_snapshot(
    generator: &mut SequenceGenerator,
    selection: Selection,
    today: NaiveDate,
    defect_limit: usize,
) -> DashboardResult<Snapshot> {
    let series = series::build_series(generator, selection.days, selection.filters, today)?;
    let totals = aggregate::aggregate(&series);
    let severity_mix = aggregate::severity_mix(&totals);
    let defects = aggregate::list_defects(&series, defect_limit);

    debug!(
        opened = totals.opened,
        pass_rate = totals.pass_rate,
        mttr_days = totals.mttr_days,
        "aggregated series"
    );

    Ok(Snapshot {
        selection,
        series,
        totals,
        severity_mix,
        defects,
    })
}

/// Selection state plus the derived view. Any change recomputes from
/// scratch; nothing is updated incrementally.
#[derive(Debug, Clone)]
pub struct Dashboard {
    generator: SequenceGenerator,
    today: NaiveDate,
    defect_limit: usize,
    snapshot: Snapshot,
}

impl Dashboard {
    pub fn new(
        mut generator: SequenceGenerator,
        selection: Selection,
        today: NaiveDate,
    ) -> DashboardResult<Self> {
        let snapshot = compute_snapshot(&mut generator, selection, today, DEFAULT_DEFECT_LIMIT)?;
        Ok(Self {
            generator,
            today,
            defect_limit: DEFAULT_DEFECT_LIMIT,
            snapshot,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selection(&self) -> Selection {
        self.snapshot.selection
    }

    pub fn set_team(&mut self, team: Team) -> DashboardResult<&Snapshot> {
        let current = self.selection();
        self.select(Selection::new(team, current.filters.environment, current.days)?)
    }

    pub fn set_environment(&mut self, environment: Environment) -> DashboardResult<&Snapshot> {
        let current = self.selection();
        self.select(Selection::new(current.filters.team, environment, current.days)?)
    }

    pub fn set_days(&mut self, days: u32) -> DashboardResult<&Snapshot> {
        let current = self.selection();
        self.select(Selection::new(current.filters.team, current.filters.environment, days)?)
    }

    /// Re-cuts the defect listing only; no generator draws.
    pub fn set_defect_limit(&mut self, limit: usize) -> &Snapshot {
        self.defect_limit = limit;
        self.snapshot.defects = aggregate::list_defects(&self.snapshot.series, limit);
        &self.snapshot
    }

    /// Reseeds the generator, so the result matches a fresh start.
    pub fn refresh(&mut self) -> DashboardResult<&Snapshot> {
        self.refresh_with(self.selection())
    }

    /// Reseeds and switches to `selection` in one recompute.
    pub fn refresh_with(&mut self, selection: Selection) -> DashboardResult<&Snapshot> {
        info!(seed = self.generator.seed(), "refreshing dashboard");
        self.generator.reset();
        self.select(selection)
    }

    fn select(&mut self, selection: Selection) -> DashboardResult<&Snapshot> {
        debug!(
            team = %selection.filters.team,
            environment = %selection.filters.environment,
            days = selection.days,
            "selection changed"
        );
        self.snapshot =
            compute_snapshot(&mut self.generator, selection, self.today, self.defect_limit)?;
        Ok(&self.snapshot)
    }
}
