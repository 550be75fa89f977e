//! radqa CLI - radiotherapy QA decision support.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use radqa_core::{AnatomicRegion, AttemptOutcome, ClinicalContext, Sex, Technique, Thresholds};
use radqa_decision::{session_record, total_cost, QaSession, SessionState};
use radqa_report::{assemble_plan, read_report, PlanReport};
use radqa_storage::{JsonStore, Storage};

#[derive(Parser)]
#[command(name = "radqa")]
#[command(about = "Radiotherapy QA technique recommendation", long_about = None)]
struct Cli {
    /// Data directory for configuration, catalog and history
    #[arg(long, default_value = ".radqa", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the metrics extracted from a plan report
    Inspect {
        /// Plan report export (tab-separated)
        report: PathBuf,
    },
    /// Run a QA session over a plan report
    Evaluate {
        /// Plan report export (tab-separated)
        report: PathBuf,
        /// Override the technique suggested from the plan name
        #[arg(long)]
        technique: Option<String>,
        /// Override the region suggested from the plan name
        #[arg(long)]
        region: Option<String>,
        /// Override the sex read from the report
        #[arg(long)]
        sex: Option<String>,
        /// Override the region-derived anatomic-changes flag
        #[arg(long)]
        anatomic_changes: Option<bool>,
        /// Pediatric patient
        #[arg(long)]
        pediatric: bool,
        /// Append the completed session to the historical record
        #[arg(long)]
        export: bool,
    },
    /// Show or update the complexity thresholds
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List exported history rows
    History {
        /// Show only the most recent N rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print the loaded cost catalog
    Catalog,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the current thresholds
    Show,
    /// Update one or more thresholds
    Set {
        /// Minimum per-beam MCS below which a modulated plan is complex
        #[arg(long)]
        mcs_min: Option<f64>,
        /// Maximum per-beam SAS above which a modulated plan is complex
        #[arg(long)]
        sas_max: Option<f64>,
        /// Fraction count above which a modulated plan is complex
        #[arg(long)]
        fractions: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let mut store = JsonStore::new(&cli.data_dir).await?;

    match cli.command {
        Commands::Inspect { report } => {
            let plan = assemble_plan(&read_report(report)?)?;
            print_plan(&plan);
        }
        Commands::Evaluate {
            report,
            technique,
            region,
            sex,
            anatomic_changes,
            pediatric,
            export,
        } => {
            let plan = assemble_plan(&read_report(report)?)?;
            let thresholds = store.load_thresholds().await?;
            let catalog = store.load_catalog().await?;

            let technique = match technique {
                Some(raw) => Technique::parse(&raw)
                    .ok_or_else(|| anyhow::anyhow!("unknown technique '{raw}'"))?,
                None => plan.suggested_technique,
            };
            let region = match region {
                Some(raw) => AnatomicRegion::parse(&raw)
                    .ok_or_else(|| anyhow::anyhow!("unknown region '{raw}'"))?,
                None => plan.suggested_region,
            };
            let sex = match sex {
                Some(raw) => Sex::from_report(&raw),
                None => plan.metrics.sex,
            };

            let mut context = ClinicalContext::new(technique, region, pediatric, sex);
            // explicit clinician override beats the region-derived flag
            if let Some(flag) = anatomic_changes {
                context.anatomic_changes = flag;
            }

            print_plan(&plan);
            println!();
            println!("Technique: {} | Region: {} | Anatomic changes: {} | Pediatric: {}",
                context.technique,
                context.region,
                yes_no(context.anatomic_changes),
                yes_no(context.pediatric),
            );

            let mut session = QaSession::begin(plan.metrics, context, &thresholds);
            println!(
                "Plan classified as {} ({} attempt(s) allowed)",
                if session.is_complex() { "COMPLEX" } else { "non-complex" },
                session.max_attempts(),
            );

            while let SessionState::Awaiting { attempt } = session.state() {
                println!();
                println!("Attempt {attempt} package:");
                for technique in session.current_package() {
                    println!("  - {technique}");
                }
                match prompt_outcome(attempt)? {
                    Some(outcome) => session.record_outcome(outcome)?,
                    None => {
                        println!("Session abandoned; nothing recorded.");
                        return Ok(());
                    }
                };
            }

            println!();
            match session.state() {
                SessionState::Validated => println!("QA passed: plan validated for delivery."),
                SessionState::ReplanRequired => {
                    println!("All attempts failed: the treatment plan must be redone.")
                }
                SessionState::Awaiting { .. } => unreachable!("loop exits on terminal states"),
            }

            println!("Attempt history:");
            for attempt in session.history() {
                println!(
                    "  {}. {} -> {}",
                    attempt.number,
                    attempt.package_label(),
                    attempt.outcome,
                );
            }
            println!(
                "Total QA cost: {:.2}",
                total_cost(session.history(), &catalog)
            );

            if export {
                let row = session_record(&session, &catalog)?;
                store.append_history(&row).await?;
                println!("Session appended to the historical record ({})", row.id);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let t = store.load_thresholds().await?;
                print_thresholds(&t);
            }
            ConfigAction::Set {
                mcs_min,
                sas_max,
                fractions,
            } => {
                let mut t = store.load_thresholds().await?;
                if let Some(v) = mcs_min {
                    t.mcs_min = v;
                }
                if let Some(v) = sas_max {
                    t.sas_max = v;
                }
                if let Some(v) = fractions {
                    t.fractions = v;
                }
                store.save_thresholds(&t).await?;
                print_thresholds(&t);
            }
        },
        Commands::History { limit } => {
            let rows = store.list_history().await?;
            let skip = limit.map_or(0, |n| rows.len().saturating_sub(n));
            println!("History ({})", rows.len());
            for row in rows.iter().skip(skip) {
                println!(
                    "  {} | {} | {} | {} | attempt 1: {} ({}) | attempt 2: {} ({}) | cost {:.2}",
                    row.date.format("%Y-%m-%d"),
                    row.patient_id,
                    row.plan_name,
                    row.technique,
                    row.attempt1_package,
                    row.attempt1_outcome,
                    row.attempt2_package,
                    row.attempt2_outcome,
                    row.total_cost,
                );
            }
        }
        Commands::Catalog => {
            let catalog = store.load_catalog().await?;
            println!("Cost catalog ({} techniques)", catalog.len());
            let mut entries: Vec<_> = catalog.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            for (name, cost) in entries {
                println!("  {name}: {cost:.2}");
            }
        }
    }

    Ok(())
}

fn print_plan(plan: &PlanReport) {
    let m = &plan.metrics;
    println!("Plan: {}", m.plan_name);
    println!("  Patient: {} ({})", m.patient_name, m.patient_id);
    println!("  Sex: {} | Fractions: {}", m.sex, m.fractions);
    println!(
        "  MCS avg: {} | SAS avg: {} | PMU avg: {}",
        m.mcs_avg, m.sas_avg, m.pmu_avg
    );
    println!("  MCS min: {} | SAS max: {}", m.mcs_min, m.sas_max);
    println!(
        "  Suggested technique: {} | Suggested region: {}",
        plan.suggested_technique, plan.suggested_region
    );
}

fn print_thresholds(t: &Thresholds) {
    println!("Thresholds");
    println!("  MCS min: {}", t.mcs_min);
    println!("  SAS max: {}", t.sas_max);
    println!("  Fractions: {}", t.fractions);
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Ask the clinician for the attempt outcome. `None` means abandon.
fn prompt_outcome(attempt: u8) -> Result<Option<AttemptOutcome>> {
    loop {
        print!("Attempt {attempt} outcome - [s]uccessful / [f]ailed / [q]uit: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().to_lowercase().as_str() {
            "s" | "successful" => return Ok(Some(AttemptOutcome::Successful)),
            "f" | "failed" => return Ok(Some(AttemptOutcome::Failed)),
            "q" | "quit" => return Ok(None),
            other => println!("Unrecognized answer '{other}'"),
        }
    }
}
