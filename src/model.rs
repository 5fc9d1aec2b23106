use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Format des clés de ligne (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Valeur affichée pour une journée neutralisée.
pub const BLACKOUT_MARK: &str = "-";

/// Identifiant fort pour une aidante
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarerId(String);

impl CarerId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CarerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Nature d'une colonne : créneau travaillé ou pause synthétique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Work,
    Break,
}

/// Colonne de la grille
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn work<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            kind: ColumnKind::Work,
        }
    }

    pub fn pause<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            kind: ColumnKind::Break,
        }
    }

    pub fn is_work(&self) -> bool {
        self.kind == ColumnKind::Work
    }
}

/// Contenu d'une cellule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Assigned(CarerId),
    Blackout,
}

impl Cell {
    pub fn carer(&self) -> Option<&CarerId> {
        match self {
            Cell::Assigned(id) => Some(id),
            Cell::Blackout => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Cell::Assigned(id) => id.as_str(),
            Cell::Blackout => BLACKOUT_MARK,
        }
    }
}

/// Une journée de la grille : une cellule par colonne, dans l'ordre des colonnes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
    cells: Vec<Cell>,
}

impl ScheduleDay {
    pub fn new(date: NaiveDate, weekday: Weekday, cells: Vec<Cell>) -> Self {
        Self {
            date,
            weekday,
            cells,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Remplace la cellule `column` et renvoie l'ancienne valeur.
    pub fn set(&mut self, column: usize, cell: Cell) -> Option<Cell> {
        self.cells
            .get_mut(column)
            .map(|slot| std::mem::replace(slot, cell))
    }

    /// Échange deux cellules de la même journée.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.cells.len() && b < self.cells.len() {
            self.cells.swap(a, b);
        }
    }

    /// Première colonne occupée par `carer`.
    pub fn position_of(&self, carer: &CarerId) -> Option<usize> {
        self.cells.iter().position(|c| c.carer() == Some(carer))
    }

    pub fn is_blackout(&self) -> bool {
        !self.cells.is_empty() && self.cells.iter().all(|c| *c == Cell::Blackout)
    }
}

/// Ligne prête à l'affichage, indexée par la date formatée.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: String,
    pub weekday: String,
    pub values: Vec<String>,
}

/// Grille complète
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub columns: Vec<Column>,
    pub days: Vec<ScheduleDay>,
}

impl Schedule {
    pub fn work_columns(&self) -> Vec<usize> {
        self.indices_of(ColumnKind::Work)
    }

    pub fn break_columns(&self) -> Vec<usize> {
        self.indices_of(ColumnKind::Break)
    }

    fn indices_of(&self, kind: ColumnKind) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == kind)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label == label)
    }

    pub fn find_day(&self, date: NaiveDate) -> Option<&ScheduleDay> {
        self.days.iter().find(|d| d.date == date)
    }

    pub fn find_day_mut(&mut self, date: NaiveDate) -> Option<&mut ScheduleDay> {
        self.days.iter_mut().find(|d| d.date == date)
    }

    /// Cellule `(date, colonne)` par libellé de colonne.
    pub fn cell(&self, date: NaiveDate, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.find_day(date)?.get(idx)
    }

    pub fn rows(&self) -> Vec<ScheduleRow> {
        self.days
            .iter()
            .map(|day| ScheduleRow {
                date: day.date.format(DATE_FORMAT).to_string(),
                weekday: weekday_label(day.weekday).to_string(),
                values: day.cells.iter().map(|c| c.label().to_string()).collect(),
            })
            .collect()
    }
}

/// Libellé anglais complet d'un jour de semaine.
pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
