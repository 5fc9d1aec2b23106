use super::{SchedError, ScheduleWarning};
use crate::model::{CarerId, Column};
use std::collections::HashSet;

/// Libellé de la `k`-ième pause (1-based) : `Break`, `Break2`, `Break3`, …
pub fn break_label(k: usize) -> String {
    if k <= 1 {
        "Break".to_string()
    } else {
        format!("Break{k}")
    }
}

/// Vérifie la liste d'aidantes : non vide, libellés non vides et uniques.
pub fn validate_carers(carers: &[CarerId]) -> Result<(), SchedError> {
    if carers.is_empty() {
        return Err(SchedError::InsufficientCarers);
    }
    let mut seen = HashSet::new();
    for carer in carers {
        if carer.as_str().trim().is_empty() {
            return Err(SchedError::EmptyLabel("carer"));
        }
        if !seen.insert(carer.as_str()) {
            return Err(SchedError::DuplicateCarer(carer.as_str().to_string()));
        }
    }
    Ok(())
}

/// Complète les créneaux avec `len(carers) - len(shifts)` colonnes de pause.
///
/// Plus de créneaux que d'aidantes : aucune pause, avertissement `ColumnOverflow`
/// (ou erreur si `strict`).
pub fn build_columns(
    carers: &[CarerId],
    shifts: &[String],
    strict: bool,
) -> Result<(Vec<Column>, Option<ScheduleWarning>), SchedError> {
    validate_carers(carers)?;

    let mut columns: Vec<Column> = Vec::with_capacity(carers.len().max(shifts.len()));
    for shift in shifts {
        let label = shift.trim();
        if label.is_empty() {
            return Err(SchedError::EmptyLabel("shift"));
        }
        columns.push(Column::work(label));
    }

    let mut warning = None;
    if shifts.len() > carers.len() {
        if strict {
            return Err(SchedError::ColumnOverflow {
                shifts: shifts.len(),
                carers: carers.len(),
            });
        }
        warning = Some(ScheduleWarning::ColumnOverflow {
            shifts: shifts.len(),
            carers: carers.len(),
        });
    }

    let off = carers.len().saturating_sub(shifts.len());
    columns.extend((1..=off).map(|k| Column::pause(break_label(k))));

    let mut seen = HashSet::new();
    for column in &columns {
        if !seen.insert(column.label.as_str()) {
            return Err(SchedError::DuplicateColumn(column.label.clone()));
        }
    }

    Ok((columns, warning))
}
