use crate::model::{CarerId, Column, Schedule, ScheduleRow};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Aidantes importées, avec l'éventuelle aidante désignée.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarerImport {
    pub carers: Vec<CarerId>,
    pub designated: Option<CarerId>,
}

/// Import d'aidantes depuis CSV: header `name[,designated]`
pub fn import_carers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<CarerImport> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = CarerImport::default();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid carer row (empty name)");
        }
        let carer = CarerId::new(name);
        if let Some(flag) = rec.get(1) {
            let flag = flag.trim();
            if !flag.is_empty()
                && parse_bool(flag)
                    .with_context(|| format!("invalid designated value for {name}"))?
            {
                if let Some(previous) = &out.designated {
                    bail!("two designated carers: {previous} and {name}");
                }
                out.designated = Some(carer.clone());
            }
        }
        out.carers.push(carer);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Export CSV de la grille: header `Date,Day,<colonnes>`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let w = WriterBuilder::new().has_headers(true).from_path(path)?;
    write_schedule_csv(w, schedule)
}

/// Rendu CSV en mémoire (même format que `export_schedule_csv`).
pub fn schedule_to_csv_string(schedule: &Schedule) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_schedule_csv(WriterBuilder::new().from_writer(&mut buf), schedule)?;
    Ok(String::from_utf8(buf)?)
}

fn write_schedule_csv<W: Write>(mut w: csv::Writer<W>, schedule: &Schedule) -> anyhow::Result<()> {
    let header = ["Date", "Day"]
        .into_iter()
        .chain(schedule.columns.iter().map(|c| c.label.as_str()));
    w.write_record(header)?;
    for row in schedule.rows() {
        let record = [row.date.as_str(), row.weekday.as_str()]
            .into_iter()
            .chain(row.values.iter().map(String::as_str));
        w.write_record(record)?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct ScheduleExport<'a> {
    columns: &'a [Column],
    rows: Vec<ScheduleRow>,
}

/// Export JSON (écriture atomique)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let path = path.as_ref();
    let export = ScheduleExport {
        columns: &schedule.columns,
        rows: schedule.rows(),
    };
    let json = serde_json::to_vec_pretty(&export)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}
