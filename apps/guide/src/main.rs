use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use navigator::{InMemoryHost, StepNavigator};
use session::{FormInput, Session};
use shared::domain::FORM_SECTION_ID;
use storage::Storage;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod walk;

use config::{load_settings, normalize_database_url, Settings};
use walk::WalkStep;

#[derive(Parser, Debug)]
#[command(name = "guide", about = "Guía de la reforma laboral: qué cambia para vos")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare current rules against the reform for the given data.
    Compare(CompareArgs),
    /// Continue with the example profile instead of personal data.
    Example {
        #[arg(long)]
        json: bool,
    },
    /// Walk the guide's steps with a scripted sequence of moves.
    Walk {
        /// Start URL; defaults to the configured base URL.
        #[arg(long)]
        url: Option<String>,
        /// next, prev, first, last, restart, goto:K, back, forward, key:NAME, swipe:left, swipe:right
        #[arg(required = true)]
        steps: Vec<String>,
    },
    /// Inspect or clear the saved profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Statutory vacation days for a seniority.
    Vacations {
        #[arg(long)]
        years: f64,
        /// Days currently granted, to check against the statutory minimum.
        #[arg(long)]
        declared: Option<u32>,
    },
    /// List sector reference data.
    Sectors,
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show {
        #[arg(long)]
        json: bool,
    },
    Clear,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    sector: String,
    /// Years in the current job.
    #[arg(long, default_value = "")]
    seniority: String,
    /// Monthly gross salary; `1.200.000` and `1200000` are both accepted.
    #[arg(long)]
    salary: String,
    #[arg(long, default_value = "")]
    variables: String,
    #[arg(long, default_value = "")]
    hours: String,
    /// micro, pyme, grande or nosabe.
    #[arg(long, default_value = "")]
    employer: String,
    #[arg(long)]
    union_member: bool,
    #[arg(long)]
    company_agreement: bool,
    /// Do not keep the profile for later runs.
    #[arg(long)]
    no_save: bool,
    #[arg(long)]
    json: bool,
}

impl CompareArgs {
    fn form_input(&self) -> FormInput {
        FormInput {
            name: self.name.clone(),
            sector: self.sector.clone(),
            seniority: self.seniority.clone(),
            salary: self.salary.clone(),
            variable_pay: self.variables.clone(),
            daily_hours: self.hours.clone(),
            employer_size: self.employer.clone(),
            union_member: self.union_member,
            company_agreement: self.company_agreement,
        }
    }
}

type GuideSession = Session<InMemoryHost, Storage>;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_settings()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Compare(args) => {
            let database_url = if args.no_save {
                "sqlite::memory:".to_string()
            } else {
                settings.database_url.clone()
            };
            let mut session = open_session(&settings, &database_url).await?;
            let form_index = form_step(&session);
            session.navigator_mut().go_to(form_index);
            session
                .submit_form(&args.form_input())
                .await
                .context("could not use the submitted data")?;
            print_comparison(&session, args.json, None)?;
        }
        Command::Example { json } => {
            let mut session = open_session(&settings, &settings.database_url).await?;
            let form_index = form_step(&session);
            session.navigator_mut().go_to(form_index);
            session.use_example_data().await;
            print_comparison(&session, json, None)?;
        }
        Command::Walk { url, steps } => {
            let steps = steps
                .iter()
                .map(|raw| raw.parse::<WalkStep>())
                .collect::<Result<Vec<_>>>()?;
            run_walk(&settings, url.as_deref(), &steps)?;
        }
        Command::Profile { action } => {
            let mut session = open_session(&settings, &settings.database_url).await?;
            match action {
                ProfileAction::Show { json } => {
                    match session.restore().await {
                        Some(saved_at) => print_comparison(&session, json, Some(saved_at))?,
                        None => println!("No hay datos guardados."),
                    }
                }
                ProfileAction::Clear => {
                    session.reset().await;
                    println!("Datos borrados.");
                }
            }
        }
        Command::Vacations { years, declared } => {
            anyhow::ensure!(
                years.is_finite() && years >= 0.0,
                "seniority must be a non-negative number of years"
            );
            print!("{}", render::vacation_report(years, declared));
        }
        Command::Sectors => {
            let table = settings.sector_table()?;
            print!("{}", render::sectors_report(&table));
        }
    }

    Ok(())
}

async fn open_session(settings: &Settings, database_url: &str) -> Result<GuideSession> {
    let database_url = normalize_database_url(database_url);
    let storage = Storage::new(&database_url)
        .await
        .with_context(|| format!("failed to open profile store at '{database_url}'"))?;
    storage.health_check().await?;

    let navigator = build_navigator(settings, None)?;
    let calculator = calculator::ReformCalculator::new(settings.sector_table()?);
    info!(database_url = %database_url, "session opened");
    Ok(Session::new(navigator, calculator, storage))
}

fn build_navigator(settings: &Settings, url: Option<&str>) -> Result<StepNavigator<InMemoryHost>> {
    let url = url.unwrap_or(&settings.base_url);
    let host = InMemoryHost::new(url).with_context(|| format!("invalid start url '{url}'"))?;
    let mut navigator = StepNavigator::new(settings.sections(), host)?;
    navigator.start();
    Ok(navigator)
}

fn form_step(session: &GuideSession) -> usize {
    session
        .navigator()
        .sections()
        .iter()
        .position(|section| section.id.as_str() == FORM_SECTION_ID)
        .unwrap_or(0)
}

fn print_comparison(
    session: &GuideSession,
    json: bool,
    saved_at: Option<DateTime<Utc>>,
) -> Result<()> {
    let (Some(profile), Some(comparison), Some(summary)) =
        (session.profile(), session.comparison(), session.summary())
    else {
        anyhow::bail!("no profile loaded");
    };

    if json {
        let payload = serde_json::json!({
            "profile": profile,
            "comparison": comparison,
            "summary": summary,
            "saved_at": saved_at,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        if let Some(saved_at) = saved_at {
            println!("guardado: {}", saved_at.format("%Y-%m-%d %H:%M"));
        }
        print!("{}", render::comparison_report(profile, comparison, &summary));
    }
    Ok(())
}

fn run_walk(settings: &Settings, url: Option<&str>, steps: &[WalkStep]) -> Result<()> {
    let mut navigator = build_navigator(settings, url)?;
    let mut events = navigator.subscribe_events();
    println!("{}", render::navigation_status(&navigator));

    for step in steps {
        let accepted = walk::apply(&mut navigator, step);
        loop {
            match events.try_recv() {
                Ok(event) => println!("  {}", render::event_line(&event)),
                Err(TryRecvError::Lagged(_)) => continue,
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        if !accepted {
            println!("  ({step:?} ignorado)");
        }
        println!("{}", render::navigation_status(&navigator));
    }
    Ok(())
}
