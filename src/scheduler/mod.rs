mod assignment;
mod columns;
mod dates;
mod designated;
mod types;
mod util;

pub use assignment::rotation_cell;
pub use columns::{break_label, build_columns, validate_carers};
pub use dates::{expand_dates, week_start};
pub use designated::{edge_target, place_on_off_day, place_on_workday, Placement};
pub use types::{
    Blackout, DesignatedMode, DesignatedRule, PlanOptions, Planning, SchedError, ScheduleWarning,
};

use crate::model::Schedule;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scheduler : calcule une grille de garde à partir d'options figées
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    opts: PlanOptions,
}

impl Scheduler {
    pub fn new(opts: PlanOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &PlanOptions {
        &self.opts
    }

    /// Vérifications structurelles, avant toute construction de grille.
    pub fn validate(&self) -> Result<(), SchedError> {
        validate_carers(&self.opts.carers)?;
        if let Some(rule) = &self.opts.designated {
            if let DesignatedMode::RandomizedPerWeek { days_per_week, .. } = rule.mode {
                if days_per_week > 7 {
                    return Err(SchedError::InvalidDaysPerWeek(days_per_week));
                }
            }
        }
        Ok(())
    }

    /// Calcule la grille ; le tirage aléatoire utilise la graine du mode si fournie.
    pub fn build(&self, start: NaiveDate, end: NaiveDate) -> Result<Planning, SchedError> {
        let seed = match self.opts.designated.as_ref().map(|r| &r.mode) {
            Some(DesignatedMode::RandomizedPerWeek { seed, .. }) => *seed,
            _ => None,
        };
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        self.build_with_rng(start, end, &mut rng)
    }

    /// Variante avec source aléatoire injectée (tests reproductibles).
    pub fn build_with_rng<R: Rng>(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        rng: &mut R,
    ) -> Result<Planning, SchedError> {
        let days = expand_dates(start, end)?;
        self.validate()?;

        let mut warnings = Vec::new();
        let (columns, overflow) =
            build_columns(&self.opts.carers, &self.opts.shifts, self.opts.strict_columns)?;
        if let Some(warning) = overflow {
            util::push_warning(&mut warnings, warning);
        }

        let grid = assignment::assign_rotative(&days, &columns, &self.opts.carers, self.opts.blackout);
        let mut schedule = Schedule {
            columns,
            days: grid,
        };

        let workdays = match &self.opts.designated {
            Some(rule) => designated::apply(&mut schedule, &self.opts.carers, rule, rng, &mut warnings),
            None => Vec::new(),
        };

        #[cfg(feature = "logging")]
        tracing::info!(
            days = schedule.days.len(),
            columns = schedule.columns.len(),
            warnings = warnings.len(),
            "schedule built"
        );

        Ok(Planning {
            schedule,
            warnings,
            workdays,
        })
    }
}
