use crate::model::{CarerId, Schedule};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Journée neutralisée : toutes les colonnes reçoivent `-`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blackout {
    pub weekday: Weekday,
    /// La rotation ne progresse pas les jours neutralisés.
    #[serde(default)]
    pub pause_rotation: bool,
}

/// Mode de placement de l'aidante désignée
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DesignatedMode {
    #[default]
    Disabled,
    FixedWeekday {
        days: Vec<Weekday>,
    },
    RandomizedPerWeek {
        days_per_week: u8,
        #[serde(default)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignatedRule {
    pub carer: CarerId,
    #[serde(flatten)]
    pub mode: DesignatedMode,
}

/// Paramètres d'un calcul de planning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanOptions {
    pub carers: Vec<CarerId>,
    pub shifts: Vec<String>,
    pub blackout: Option<Blackout>,
    pub designated: Option<DesignatedRule>,
    /// `ColumnOverflow` devient une erreur au lieu d'un avertissement.
    pub strict_columns: bool,
}

/// Dégradations locales : le calcul continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleWarning {
    ColumnOverflow {
        shifts: usize,
        carers: usize,
    },
    MissingBreakColumn {
        date: NaiveDate,
    },
    UnderfilledWeek {
        week_start: NaiveDate,
        requested: usize,
        selected: usize,
    },
    DesignatedNotRostered {
        carer: CarerId,
    },
}

impl std::fmt::Display for ScheduleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleWarning::ColumnOverflow { shifts, carers } => write!(
                f,
                "{shifts} shift(s) for {carers} carer(s): no break column, rotation repeats carers"
            ),
            ScheduleWarning::MissingBreakColumn { date } => {
                write!(f, "{date}: no break column to park the designated carer")
            }
            ScheduleWarning::UnderfilledWeek {
                week_start,
                requested,
                selected,
            } => write!(
                f,
                "week of {week_start}: {selected}/{requested} workday(s) selected (non-adjacency)"
            ),
            ScheduleWarning::DesignatedNotRostered { carer } => {
                write!(f, "designated carer {carer} is not in the carer list")
            }
        }
    }
}

/// Résultat d'un calcul
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planning {
    pub schedule: Schedule,
    pub warnings: Vec<ScheduleWarning>,
    /// Jours où l'aidante désignée est placée sur un créneau de bord.
    pub workdays: Vec<NaiveDate>,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
    #[error("at least one carer is required")]
    InsufficientCarers,
    #[error("empty {0} label")]
    EmptyLabel(&'static str),
    #[error("duplicate carer: {0}")]
    DuplicateCarer(String),
    #[error("duplicate column label: {0}")]
    DuplicateColumn(String),
    #[error("{shifts} shift(s) for only {carers} carer(s)")]
    ColumnOverflow { shifts: usize, carers: usize },
    #[error("days_per_week must be within 0..=7, got {0}")]
    InvalidDaysPerWeek(u8),
    #[error("date overflow after {0}")]
    DateOverflow(NaiveDate),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
