#![forbid(unsafe_code)]
//! Garde : planification de tours de garde pour une équipe d'aidantes.
//!
//! - Rotation circulaire jour par jour, colonnes de pause synthétiques.
//! - Journée neutralisée configurable (blackout).
//! - Règle de placement pour une aidante désignée (jours fixes ou tirage hebdomadaire).
//! - Aucun état global ; la grille appartient au calcul qui la produit.

pub mod io;
pub mod model;
pub mod plan;
pub mod scheduler;

pub use model::{
    weekday_label, CarerId, Cell, Column, ColumnKind, Schedule, ScheduleDay, ScheduleRow,
};
pub use plan::{export_plan_json, load_plan_from_file, Plan, PlanInfo, PlanStore};
pub use scheduler::{
    Blackout, DesignatedMode, DesignatedRule, PlanOptions, Planning, SchedError, ScheduleWarning,
    Scheduler,
};
