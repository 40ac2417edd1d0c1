#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use medrec_core::{ActivityLevel, Gender, HealthProfile};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    AnalyzeInput, AnalyzeStrategy, CommandStrategy, ConditionsInput, ConditionsStrategy,
    InfoStrategy, InitStrategy, MatchInput, MatchStrategy, PredictInput, PredictStrategy,
    SymptomsInput, SymptomsStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "medrec")]
#[command(about = "Symptom-based disease, medication and diet recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: possible diseases, medications and a diet chart
    Analyze {
        /// Comma-separated symptoms, e.g. "fever, cough"
        symptoms: String,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=120))]
        age: u32,

        /// male or female
        #[arg(long)]
        gender: Gender,

        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,

        /// sedentary, lightly_active, moderately_active, very_active or extra_active
        #[arg(long, default_value = "moderately_active")]
        activity: ActivityLevel,

        /// Dietary restrictions or allergies
        #[arg(long)]
        diet: Option<String>,

        /// Dataset CSV, overriding the configured path
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Model to use
        #[arg(short = 'M', long)]
        model: Option<String>,

        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,
    },
    /// Predict diseases, asking the model when the dataset has no match
    Predict {
        /// Comma-separated symptoms
        symptoms: String,

        #[arg(long)]
        dataset: Option<PathBuf>,

        #[arg(short = 'M', long)]
        model: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Rank dataset diseases for the given symptoms (offline)
    Match {
        /// Comma-separated symptoms
        symptoms: String,

        #[arg(long)]
        dataset: Option<PathBuf>,

        /// Maximum number of diseases to show
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        #[arg(long)]
        json: bool,
    },
    /// Show knowledge-base entries that list any of the given symptoms
    Conditions {
        /// Comma-separated symptoms
        symptoms: String,

        #[arg(long)]
        dataset: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },
    /// List the symptom vocabulary of the dataset
    Symptoms {
        /// Only show symptoms related to this phrase
        #[arg(short, long)]
        filter: Option<String>,

        #[arg(long)]
        dataset: Option<PathBuf>,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and dataset status
    Info,
    /// Show version
    Version,
}

fn validate_measure(name: &str, value: f64) -> anyhow::Result<f64> {
    if value.is_finite() && value >= 1.0 {
        Ok(value)
    } else {
        anyhow::bail!("{name} must be a positive number")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            symptoms,
            age,
            gender,
            weight,
            height,
            activity,
            diet,
            dataset,
            model,
            json,
        } => {
            let profile = HealthProfile {
                age,
                gender,
                weight_kg: validate_measure("Weight", weight)?,
                height_cm: validate_measure("Height", height)?,
                activity_level: activity,
                dietary_restrictions: diet,
            };
            AnalyzeStrategy
                .execute(AnalyzeInput {
                    symptoms,
                    profile,
                    dataset,
                    model,
                    json,
                })
                .await?;
        }
        Commands::Predict {
            symptoms,
            dataset,
            model,
            json,
        } => {
            PredictStrategy
                .execute(PredictInput {
                    symptoms,
                    dataset,
                    model,
                    json,
                })
                .await?;
        }
        Commands::Match {
            symptoms,
            dataset,
            top_k,
            json,
        } => {
            MatchStrategy
                .execute(MatchInput {
                    symptoms,
                    dataset,
                    top_k,
                    json,
                })
                .await?;
        }
        Commands::Conditions {
            symptoms,
            dataset,
            json,
        } => {
            ConditionsStrategy
                .execute(ConditionsInput {
                    symptoms,
                    dataset,
                    json,
                })
                .await?;
        }
        Commands::Symptoms { filter, dataset } => {
            SymptomsStrategy
                .execute(SymptomsInput { dataset, filter })
                .await?;
        }
        Commands::Init => InitStrategy.execute(()).await?,
        Commands::Info => InfoStrategy.execute(()).await?,
        Commands::Version => VersionStrategy.execute(()).await?,
    }

    Ok(())
}
