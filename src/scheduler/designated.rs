use super::{dates, util, DesignatedMode, DesignatedRule, ScheduleWarning};
use crate::model::{CarerId, Cell, Schedule, ScheduleDay};
use chrono::{NaiveDate, Weekday};
use rand::Rng;
use std::collections::HashSet;

/// Effet d'une règle de placement sur une journée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Unchanged,
    Moved,
    MissingBreak,
}

/// Créneau de bord : premier créneau vendredi et samedi, dernier sinon.
pub fn edge_target(weekday: Weekday, work_columns: &[usize]) -> Option<usize> {
    match weekday {
        Weekday::Fri | Weekday::Sat => work_columns.first().copied(),
        _ => work_columns.last().copied(),
    }
}

/// Amène `carer` sur `target` par échange de deux cellules.
///
/// Absente de la journée : elle prend `target` et l'occupant de `target` part
/// sur la colonne de pause `parking`.
pub fn place_on_workday(
    day: &mut ScheduleDay,
    carer: &CarerId,
    target: usize,
    parking: Option<usize>,
) -> Placement {
    match day.position_of(carer) {
        Some(pos) if pos == target => Placement::Unchanged,
        Some(pos) => {
            day.swap(pos, target);
            Placement::Moved
        }
        None => {
            let Some(parking) = parking else {
                return Placement::MissingBreak;
            };
            if let Some(previous) = day.set(target, Cell::Assigned(carer.clone())) {
                day.set(parking, previous);
            }
            Placement::Moved
        }
    }
}

/// Jour de repos : si `carer` tient un créneau travaillé, échange avec `parking`.
pub fn place_on_off_day(
    day: &mut ScheduleDay,
    carer: &CarerId,
    work_columns: &[usize],
    parking: Option<usize>,
) -> Placement {
    let Some(pos) = day.position_of(carer) else {
        return Placement::Unchanged;
    };
    if !work_columns.contains(&pos) {
        return Placement::Unchanged;
    }
    let Some(parking) = parking else {
        return Placement::MissingBreak;
    };
    day.swap(pos, parking);
    Placement::Moved
}

/// Applique la règle sur toute la grille et renvoie les jours travaillés retenus.
pub(super) fn apply<R: Rng>(
    schedule: &mut Schedule,
    carers: &[CarerId],
    rule: &DesignatedRule,
    rng: &mut R,
    warnings: &mut Vec<ScheduleWarning>,
) -> Vec<NaiveDate> {
    if rule.mode == DesignatedMode::Disabled {
        return Vec::new();
    }
    if !carers.contains(&rule.carer) {
        util::push_warning(
            warnings,
            ScheduleWarning::DesignatedNotRostered {
                carer: rule.carer.clone(),
            },
        );
        return Vec::new();
    }

    let workdays = select_workdays(&rule.mode, &schedule.days, rng, warnings);
    let work_columns = schedule.work_columns();
    let parking = schedule.break_columns().first().copied();
    let workday_set: HashSet<NaiveDate> = workdays.iter().copied().collect();

    for day in schedule.days.iter_mut().filter(|d| !d.is_blackout()) {
        let placement = if workday_set.contains(&day.date) {
            match edge_target(day.weekday, &work_columns) {
                Some(target) => place_on_workday(day, &rule.carer, target, parking),
                None => Placement::Unchanged,
            }
        } else {
            place_on_off_day(day, &rule.carer, &work_columns, parking)
        };

        #[cfg(feature = "logging")]
        tracing::debug!(date = %day.date, carer = %rule.carer, ?placement, "designated placement");

        if placement == Placement::MissingBreak {
            util::push_warning(warnings, ScheduleWarning::MissingBreakColumn { date: day.date });
        }
    }

    workdays
}

/// Jours travaillés de l'aidante désignée, en ordre chronologique.
fn select_workdays<R: Rng>(
    mode: &DesignatedMode,
    days: &[ScheduleDay],
    rng: &mut R,
    warnings: &mut Vec<ScheduleWarning>,
) -> Vec<NaiveDate> {
    let candidates = days.iter().filter(|d| !d.is_blackout());
    match mode {
        DesignatedMode::Disabled => Vec::new(),
        DesignatedMode::FixedWeekday { days: weekdays } => candidates
            .filter(|d| weekdays.contains(&d.weekday))
            .map(|d| d.date)
            .collect(),
        DesignatedMode::RandomizedPerWeek { days_per_week, .. } => {
            let mut out = Vec::new();
            for (week_start, week) in group_by_week(candidates.map(|d| d.date)) {
                let requested = usize::from(*days_per_week).min(week.len());
                let picked = pick_non_adjacent(&week, requested, rng);
                if picked.len() < requested {
                    util::push_warning(
                        warnings,
                        ScheduleWarning::UnderfilledWeek {
                            week_start,
                            requested,
                            selected: picked.len(),
                        },
                    );
                }
                out.extend(picked);
            }
            out
        }
    }
}

/// Regroupe des dates chronologiques par semaine commençant le dimanche.
fn group_by_week(dates: impl Iterator<Item = NaiveDate>) -> Vec<(NaiveDate, Vec<NaiveDate>)> {
    let mut weeks: Vec<(NaiveDate, Vec<NaiveDate>)> = Vec::new();
    for date in dates {
        let start = dates::week_start(date);
        match weeks.last_mut() {
            Some((current, days)) if *current == start => days.push(date),
            _ => weeks.push((start, vec![date])),
        }
    }
    weeks
}

/// Tirage sans remise, sans retour arrière : un jour est retenu s'il n'est
/// voisin d'aucun jour déjà retenu. Peut renvoyer moins de `k` jours.
fn pick_non_adjacent<R: Rng>(candidates: &[NaiveDate], k: usize, rng: &mut R) -> Vec<NaiveDate> {
    let mut pool = candidates.to_vec();
    let mut selected: Vec<NaiveDate> = Vec::with_capacity(k);

    while selected.len() < k && !pool.is_empty() {
        let day = pool.swap_remove(rng.random_range(0..pool.len()));
        if selected
            .iter()
            .all(|s| dates::days_between(*s, day).abs() != 1)
        {
            selected.push(day);
        }
    }

    selected.sort();
    selected
}
