#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use roulement::{
    compliance::{validate_schedule, Period, ValidationOptions},
    cost::{calculate_schedule_cost, forecast_costs, optimize_costs, CostOptions},
    generator::{
        generate_intelligent_schedule, optimize_existing_schedule, AnalysisConstraints,
        ForecastData, GenerationRequest, ScheduleConstraints,
    },
    io,
    storage::{Dataset, JsonStorage, Storage},
};
use std::fs;
use std::time::Duration;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification d'équipe (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du jeu de données
    #[arg(long, global = true, default_value = "dataset.json")]
    data: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PeriodArg {
    Month,
    Year,
}

impl From<PeriodArg> for Period {
    fn from(p: PeriodArg) -> Self {
        match p {
            PeriodArg::Month => Period::Month,
            PeriodArg::Year => Period::Year,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Importer des salariés depuis un CSV
    ImportEmployees {
        #[arg(long)]
        csv: String,
    },

    /// Importer des créneaux depuis un CSV
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Générer un planning sur une période
    Generate {
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        end: String,
        /// Fichier JSON de contraintes (valeurs par défaut sinon)
        #[arg(long)]
        constraints: Option<String>,
        /// Fichier JSON de prévision d'effectifs
        #[arg(long)]
        forecast: Option<String>,
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        no_weekends: bool,
        #[arg(long)]
        no_nights: bool,
        #[arg(long)]
        no_overtime: bool,
        /// Limite de temps en secondes
        #[arg(long)]
        time_limit: Option<u64>,
        /// Ajoute les créneaux générés au jeu de données
        #[arg(long)]
        save: bool,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Contrôler la conformité des créneaux du jeu de données
    Validate {
        #[arg(long, value_enum, default_value_t = PeriodArg::Month)]
        period: PeriodArg,
        /// Export JSON du rapport (optionnel)
        #[arg(long)]
        report: Option<String>,
    },

    /// Chiffrer les créneaux du jeu de données
    Cost {
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Comparer le coût à un budget
    Optimize {
        #[arg(long)]
        budget: f64,
    },

    /// Prévoir le coût des prochains jours à partir de l'historique
    Forecast {
        #[arg(long, default_value_t = 30)]
        days: u32,
    },

    /// Analyser le planning existant (conformité, coût, équilibre)
    Analyze {
        #[arg(long)]
        budget: Option<f64>,
        #[arg(long)]
        out_json: Option<String>,
    },

    /// Exporter les créneaux en CSV
    ExportShifts {
        #[arg(long)]
        csv: String,
    },
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing {path}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.data)?;
    // Fichier absent = jeu vide ; un fichier illisible est une erreur.
    let mut dataset = if storage.path().exists() {
        storage.load()?
    } else {
        Dataset::default()
    };

    let code = match cli.cmd {
        Commands::ImportEmployees { csv } => {
            let employees = io::import_employees_csv(csv)?;
            println!("Imported {} employee(s)", employees.len());
            dataset.employees.extend(employees);
            storage.save(&dataset)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let shifts = io::import_shifts_csv(csv)?;
            println!("Imported {} shift(s)", shifts.len());
            dataset.shifts.extend(shifts);
            storage.save(&dataset)?;
            0
        }
        Commands::Generate {
            start,
            end,
            constraints,
            forecast,
            budget,
            no_weekends,
            no_nights,
            no_overtime,
            time_limit,
            save,
            out_json,
            out_csv,
        } => {
            let mut constraints: ScheduleConstraints = match constraints {
                Some(path) => read_json(&path)?,
                None => ScheduleConstraints::default(),
            };
            if no_weekends {
                constraints.allow_weekend_work = false;
            }
            if no_nights {
                constraints.allow_night_shifts = false;
            }
            if no_overtime {
                constraints.allow_overtime = false;
            }
            let forecast: Option<ForecastData> = forecast.map(|p| read_json(&p)).transpose()?;

            let mut request = GenerationRequest::new(
                &dataset.employees,
                &dataset.templates,
                parse_date(&start)?,
                parse_date(&end)?,
            )
            .with_constraints(constraints)
            .with_availabilities(&dataset.availabilities)
            .with_leaves(&dataset.leaves);
            if let Some(f) = forecast.as_ref() {
                request = request.with_forecast(f);
            }
            if let Some(b) = budget {
                request = request.with_budget(b);
            }
            if let Some(secs) = time_limit {
                request = request.with_time_limit(Duration::from_secs(secs));
            }

            let result = generate_intelligent_schedule(&request)?;
            println!(
                "Generated {} shift(s) over {} day(s) | cost {:.2} | {} error(s), {} warning(s)",
                result.metadata.total_shifts,
                result.metadata.total_days,
                result.costs.total_cost,
                result.validation.summary.errors,
                result.validation.summary.warnings
            );
            if let Some(status) = &result.budget_status {
                println!(
                    "Budget {:.2} | difference {:.2} | {}",
                    status.budget,
                    status.difference,
                    if status.within_budget { "within budget" } else { "over budget" }
                );
            }
            if let Some(path) = out_json {
                io::export_json(path, &result)?;
            }
            if let Some(path) = out_csv {
                io::export_shifts_csv(path, &result.schedule, &dataset.employees)?;
            }
            if save {
                let schedule = result.schedule;
                dataset.shifts.extend(schedule);
                storage.save(&dataset)?;
            }
            0
        }
        Commands::Validate { period, report } => {
            let options = ValidationOptions {
                period: period.into(),
                ..ValidationOptions::default()
            };
            let result = validate_schedule(&dataset.shifts, &options);
            if let Some(path) = report {
                io::export_json(path, &result)?;
            }
            if result.is_valid && result.violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                for v in &result.violations {
                    let employee = v.employee_id.as_ref().map(|id| id.as_str()).unwrap_or("-");
                    println!("{:?} | {} | {} | {}", v.severity, v.article, employee, v.message);
                }
                eprintln!(
                    "Found {} error(s), {} warning(s)",
                    result.summary.errors, result.summary.warnings
                );
                // Code 2 = ERREUR de conformité
                if result.is_valid {
                    0
                } else {
                    2
                }
            }
        }
        Commands::Cost { out_json } => {
            let costs =
                calculate_schedule_cost(&dataset.shifts, &dataset.employees, &CostOptions::default());
            if let Some(path) = out_json {
                io::export_json(path, &costs)?;
            }
            for e in &costs.employee_costs {
                println!(
                    "{} | {} shift(s) | {:.1}h | {:.2}",
                    e.employee_name, e.shift_count, e.total_hours, e.total_cost
                );
            }
            println!(
                "Total {:.2} for {:.1}h ({:.2}/h)",
                costs.total_cost, costs.total_hours, costs.average_cost_per_hour
            );
            0
        }
        Commands::Optimize { budget } => {
            if budget < 0.0 {
                bail!("budget must be positive");
            }
            let result =
                optimize_costs(&dataset.shifts, &dataset.employees, budget, &CostOptions::default());
            println!("{}", serde_json::to_string_pretty(&result)?);
            0
        }
        Commands::Forecast { days } => {
            let forecast = forecast_costs(&dataset.shifts, &dataset.employees, days);
            println!("{}", serde_json::to_string_pretty(&forecast)?);
            0
        }
        Commands::Analyze { budget, out_json } => {
            let constraints = AnalysisConstraints {
                budget,
                ..AnalysisConstraints::default()
            };
            let analysis =
                optimize_existing_schedule(&dataset.shifts, &dataset.employees, &constraints);
            if let Some(path) = out_json {
                io::export_json(path, &analysis)?;
            }
            println!("Optimization score: {:.0}/100", analysis.optimization_score);
            for s in &analysis.suggestions {
                println!("[{:?}] {}", s.priority, s.message);
            }
            0
        }
        Commands::ExportShifts { csv } => {
            io::export_shifts_csv(csv, &dataset.shifts, &dataset.employees)?;
            0
        }
    };

    std::process::exit(code);
}
