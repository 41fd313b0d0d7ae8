use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use clap::{Parser, Subcommand};

mod classifier;
mod clean;
mod dataset;
mod error;
mod models;
mod pipeline;
mod report;

use classifier::HfApiClassifier;

#[derive(Parser)]
#[command(name = "comment-sentiment")]
#[command(about = "Sentiment analysis of student comments, grouped by teacher", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the teacher ids present in a comments CSV
    Teachers {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Classify one teacher's comments and render the summary report
    Analyze {
        #[arg(long)]
        csv: PathBuf,
        /// Teacher id to analyze (see the `teachers` subcommand)
        #[arg(long)]
        teacher: String,
        /// Write the markdown report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Sentiment model inference endpoint
        #[arg(long, default_value = classifier::DEFAULT_ENDPOINT)]
        endpoint: String,
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Teachers { csv } => {
            let records = dataset::load_comments(&csv)?;
            let ids = dataset::teacher_ids(&records);
            if ids.is_empty() {
                println!("No teacher ids found in {}.", csv.display());
                return Ok(());
            }
            for id in ids {
                println!("{id}");
            }
        }
        Commands::Analyze {
            csv,
            teacher,
            out,
            endpoint,
            timeout_secs,
        } => {
            let records = dataset::load_comments(&csv)?;
            let api_token = std::env::var("HF_API_TOKEN").ok();
            let classifier =
                HfApiClassifier::new(endpoint, api_token, Duration::from_secs(timeout_secs));

            let summary = pipeline::analyze_teacher(&records, &teacher, &classifier).await?;
            let rendered = report::render_markdown(&summary, Utc::now().date_naive());

            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Report written to {}.", path.display());
                }
                None => print!("{rendered}"),
            }
        }
    }

    Ok(())
}
