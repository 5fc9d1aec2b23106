use crate::model::CarerId;
use crate::scheduler::{validate_carers, Blackout, DesignatedRule, PlanOptions};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Jeu de paramètres enregistré (aidantes, créneaux, règles).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub carers: Vec<CarerId>,
    #[serde(default)]
    pub shifts: Vec<String>,
    #[serde(default)]
    pub blackout: Option<Blackout>,
    #[serde(default)]
    pub designated: Option<DesignatedRule>,
    #[serde(default)]
    pub strict_columns: bool,
}

impl Plan {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("plan id cannot be empty");
        }
        if self.id.contains(['/', '\\']) {
            bail!("plan id cannot contain path separators");
        }
        if self.name.trim().is_empty() {
            bail!("plan name cannot be empty");
        }
        validate_carers(&self.carers).context("invalid carer list")?;
        if self.shifts.iter().any(|s| s.trim().is_empty()) {
            bail!("shift labels cannot be empty");
        }
        Ok(())
    }

    pub fn options(&self) -> PlanOptions {
        PlanOptions {
            carers: self.carers.clone(),
            shifts: self.shifts.clone(),
            blackout: self.blackout,
            designated: self.designated.clone(),
            strict_columns: self.strict_columns,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlanInfo {
    pub plan: Plan,
    pub path: PathBuf,
    pub modified: Option<DateTime<Utc>>,
}

/// Répertoire de plans `<id>.json`.
#[derive(Debug, Clone)]
pub struct PlanStore {
    base_dir: PathBuf,
}

impl PlanStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            base_dir: dir.as_ref().to_path_buf(),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.base_dir)
            .with_context(|| format!("creating plan directory {}", self.base_dir.display()))
    }

    pub fn save(&self, plan: &Plan) -> Result<PathBuf> {
        plan.validate()?;
        self.ensure_dir()?;
        let path = self.base_dir.join(format!("{}.json", plan.id));
        export_plan_json(&path, plan)?;
        Ok(path)
    }

    pub fn load(&self, id: &str) -> Result<Plan> {
        let path = self.base_dir.join(format!("{}.json", id));
        load_plan_from_file(&path)
    }

    pub fn list(&self) -> Result<Vec<PlanInfo>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }
        let mut infos = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let plan = match load_plan_from_file(&path) {
                Ok(p) => p,
                Err(err) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!(path = %path.display(), "skipping plan: {err:#}");
                    #[cfg(not(feature = "logging"))]
                    eprintln!("Warning: could not load plan {}: {err:#}", path.display());
                    continue;
                }
            };
            let modified = entry
                .metadata()
                .and_then(|meta| meta.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            infos.push(PlanInfo {
                plan,
                path,
                modified,
            });
        }
        infos.sort_by(|a, b| a.plan.id.cmp(&b.plan.id));
        Ok(infos)
    }
}

pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &Plan) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(plan)?;
    fs::write(path, json).with_context(|| format!("writing plan {}", path.display()))
}

pub fn load_plan_from_file<P: AsRef<Path>>(path: P) -> Result<Plan> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading plan {}", path.display()))?;
    let plan: Plan = serde_json::from_slice(&data)
        .with_context(|| format!("parsing plan {}", path.display()))?;
    plan.validate()?;
    Ok(plan)
}
