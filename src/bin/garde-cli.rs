#![forbid(unsafe_code)]
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Duration, NaiveDate, Weekday};
use clap::{Parser, Subcommand};
use garde::{
    io,
    model::{CarerId, Schedule},
    plan::{load_plan_from_file, Plan, PlanStore},
    scheduler::{Blackout, DesignatedMode, DesignatedRule, PlanOptions, Scheduler},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification des tours de garde
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(clap::Args, Debug)]
struct PlanArgs {
    /// liste "Nawal,Hanan,..." (ordre = ordre de rotation)
    #[arg(long)]
    carers: Option<String>,
    /// CSV `name[,designated]`
    #[arg(long)]
    carers_csv: Option<String>,
    /// liste "12:00-15:30,15:30-19:00,..."
    #[arg(long)]
    shifts: Option<String>,
    /// Aidante désignée
    #[arg(long)]
    designated: Option<String>,
    /// Jours fixes de l'aidante désignée, ex. "Tue,Thu,Sat"
    #[arg(long, conflicts_with = "per_week")]
    fixed_days: Option<String>,
    /// Nombre de jours tirés par semaine (0..=7)
    #[arg(long)]
    per_week: Option<u8>,
    /// Graine du tirage hebdomadaire
    #[arg(long, requires = "per_week")]
    seed: Option<u64>,
    /// Jour neutralisé (toutes colonnes à "-")
    #[arg(long)]
    blackout: Option<String>,
    /// La rotation ne progresse pas le jour neutralisé
    #[arg(long, requires = "blackout")]
    pause_rotation: bool,
    /// Plus de créneaux que d'aidantes = erreur
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer et afficher la grille
    Generate {
        /// YYYY-MM-DD ou DD/MM/YYYY
        #[arg(long)]
        start: String,
        /// Par défaut : start + 30 jours
        #[arg(long)]
        end: Option<String>,
        /// Fichier plan JSON (remplace les options de plan)
        #[arg(long)]
        plan: Option<String>,
        #[command(flatten)]
        args: PlanArgs,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Enregistrer un plan dans un répertoire
    SavePlan {
        #[arg(long, default_value = "plans")]
        dir: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        args: PlanArgs,
    },

    /// Lister les plans d'un répertoire
    ListPlans {
        #[arg(long, default_value = "plans")]
        dir: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Generate {
            start,
            end,
            plan,
            args,
            out_json,
            out_csv,
        } => {
            let start = parse_date(&start)?;
            let end = match end {
                Some(raw) => parse_date(&raw)?,
                None => start + Duration::days(30),
            };
            let opts = match plan {
                Some(path) => load_plan_from_file(path)?.options(),
                None => plan_options(&args)?,
            };
            let planning = Scheduler::new(opts).build(start, end)?;

            if let Some(path) = out_json {
                io::export_schedule_json(path, &planning.schedule)?;
            }
            if let Some(path) = out_csv {
                io::export_schedule_csv(path, &planning.schedule)?;
            }
            print_table(&planning.schedule);

            if planning.warnings.is_empty() {
                0
            } else {
                for w in &planning.warnings {
                    eprintln!("warning: {w}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::SavePlan {
            dir,
            id,
            name,
            description,
            args,
        } => {
            let opts = plan_options(&args)?;
            let plan = Plan {
                id,
                name,
                description,
                carers: opts.carers,
                shifts: opts.shifts,
                blackout: opts.blackout,
                designated: opts.designated,
                strict_columns: opts.strict_columns,
            };
            let path = PlanStore::new(dir).save(&plan)?;
            println!("Plan saved to {}", path.display());
            0
        }
        Commands::ListPlans { dir } => {
            for info in PlanStore::new(dir).list()? {
                println!(
                    "{} | {} | {} carer(s) | {} shift(s)",
                    info.plan.id,
                    info.plan.name,
                    info.plan.carers.len(),
                    info.plan.shifts.len()
                );
            }
            0
        }
    };

    std::process::exit(code);
}

fn plan_options(args: &PlanArgs) -> Result<PlanOptions> {
    let (carers, csv_designated): (Vec<CarerId>, Option<CarerId>) = match (&args.carers, &args.carers_csv) {
        (Some(list), None) => (split_list(list).map(CarerId::new).collect(), None),
        (None, Some(path)) => {
            let import = io::import_carers_csv(path)?;
            (import.carers, import.designated)
        }
        (Some(_), Some(_)) => bail!("--carers and --carers-csv are mutually exclusive"),
        (None, None) => bail!("--carers, --carers-csv or --plan is required"),
    };
    let shifts: Vec<String> = args
        .shifts
        .as_deref()
        .map(|s| split_list(s).map(str::to_string).collect())
        .unwrap_or_default();

    let mode = match (&args.fixed_days, args.per_week) {
        (Some(days), _) => DesignatedMode::FixedWeekday {
            days: split_list(days).map(parse_weekday).collect::<Result<_>>()?,
        },
        (None, Some(days_per_week)) => DesignatedMode::RandomizedPerWeek {
            days_per_week,
            seed: args.seed,
        },
        (None, None) => DesignatedMode::Disabled,
    };
    let designated = args
        .designated
        .as_deref()
        .map(CarerId::new)
        .or(csv_designated)
        .map(|carer| DesignatedRule { carer, mode });

    let blackout = args
        .blackout
        .as_deref()
        .map(|raw| {
            parse_weekday(raw).map(|weekday| Blackout {
                weekday,
                pause_rotation: args.pause_rotation,
            })
        })
        .transpose()?;

    Ok(PlanOptions {
        carers,
        shifts,
        blackout,
        designated,
        strict_columns: args.strict,
    })
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .with_context(|| format!("invalid date: {raw}"))
}

fn parse_weekday(raw: &str) -> Result<Weekday> {
    raw.trim()
        .parse::<Weekday>()
        .map_err(|_| anyhow!("invalid weekday: {raw}"))
}

fn print_table(schedule: &Schedule) {
    let rows = schedule.rows();
    let mut header = vec!["Date".to_string(), "Day".to_string()];
    header.extend(schedule.columns.iter().map(|c| c.label.clone()));

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        let cells = [&row.date, &row.weekday].into_iter().chain(row.values.iter());
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    println!("{}", line(header.iter().map(String::as_str).collect()));
    for row in &rows {
        let cells = [row.date.as_str(), row.weekday.as_str()]
            .into_iter()
            .chain(row.values.iter().map(String::as_str))
            .collect();
        println!("{}", line(cells));
    }
}
