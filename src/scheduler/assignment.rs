use super::Blackout;
use crate::model::{CarerId, Cell, Column, ScheduleDay};
use chrono::{NaiveDate, Weekday};

/// Aidante de la colonne `column` pour un décalage de rotation `offset`.
pub fn rotation_cell(carers: &[CarerId], column: usize, offset: usize) -> &CarerId {
    &carers[(column + offset) % carers.len()]
}

/// Construit les journées en rotation circulaire.
///
/// `carers` doit être non vide (vérifié en amont par `build_columns`).
pub(super) fn assign_rotative(
    days: &[(NaiveDate, Weekday)],
    columns: &[Column],
    carers: &[CarerId],
    blackout: Option<Blackout>,
) -> Vec<ScheduleDay> {
    let total = carers.len();
    let pause = blackout.map_or(false, |b| b.pause_rotation);
    // nombre de jours non neutralisés déjà servis
    let mut served = 0usize;

    days.iter()
        .enumerate()
        .map(|(index, &(date, weekday))| {
            if blackout.map_or(false, |b| b.weekday == weekday) {
                return ScheduleDay::new(date, weekday, vec![Cell::Blackout; columns.len()]);
            }

            let offset = if pause { served % total } else { index % total };
            served += 1;

            let cells = (0..columns.len())
                .map(|j| Cell::Assigned(rotation_cell(carers, j, offset).clone()))
                .collect();
            ScheduleDay::new(date, weekday, cells)
        })
        .collect()
}
