use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{
    form::{FormState, SubmissionOutcome},
    network::{LOCAL_SERVER, NetworkClient, ScopusBackend},
};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Color, Style, object::Rows},
};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Tabled)]
struct Field {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

fn print_table(rows: &[impl Tabled]) {
    if rows.is_empty() {
        println!("No entries");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::modern_rounded());
        table.modify(Rows::first(), Alignment::center());
        table.modify(Rows::first(), Color::FG_CYAN);
        println!("{}", table);
    }
}

fn form_rows(form: &FormState) -> Vec<Field> {
    vec![
        Field {
            name: "Result",
            value: form.result_message.clone(),
        },
        Field {
            name: "Error",
            value: form.is_error.to_string(),
        },
        Field {
            name: "Download link",
            value: form.download_url.clone(),
        },
    ]
}

/// Request Scopus publication exports from the command line
#[derive(Debug, Parser)]
#[command(name = "Scopus Export Cli")]
#[command(version = "0.1.0")]
#[command(about = "Request and fetch publication exports", long_about = None)]
struct Cli {
    /// Backend serving the /scopus endpoints
    #[arg(short, long, global = true, default_value = LOCAL_SERVER)]
    server: Url,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Submit the export form
    Submit {
        #[arg(short, long)]
        year: String,
        /// A for annual, Q for quarterly
        #[arg(short = 't', long)]
        search_type: String,
        /// quarter_1 to quarter_4, only used for quarterly searches
        #[arg(short, long)]
        quarter: Option<String>,
        /// Fetch the generated file into this directory
        #[arg(short, long)]
        download: Option<PathBuf>,
    },
    /// Fetch a previously generated file
    Download {
        filename: String,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Print the download link for a file
    Url { filename: String },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    let args = Cli::parse();
    let network = NetworkClient::new(args.server)?;

    match args.command {
        Commands::Submit {
            year,
            search_type,
            quarter,
            download,
        } => {
            let mut form = FormState::new();
            form.on_publication_year_change(&year);
            form.on_search_type_change(&search_type);
            if let Some(quarter) = quarter {
                if !form.shows_quarter_selector() {
                    warn!("--quarter is only used for quarterly searches, ignoring it");
                }
                form.on_quarter_change(&quarter);
            }

            let outcome = form.submit(&network).await;
            print_table(&form_rows(&form));

            match outcome {
                SubmissionOutcome::Succeeded {
                    filename: Some(filename),
                    ..
                } => {
                    if let Some(dir) = download {
                        let path = network.download(&filename, &dir).await?;
                        println!("Saved {}", path.display());
                    }
                }
                SubmissionOutcome::Succeeded { filename: None, .. } => {
                    if download.is_some() {
                        warn!("Backend did not name a file, nothing to download");
                    }
                }
                SubmissionOutcome::Failed(_) => return Ok(ExitCode::FAILURE),
            }
        }
        Commands::Download { filename, out } => {
            let path = network.download(&filename, &out).await?;
            println!("Saved {}", path.display());
        }
        Commands::Url { filename } => {
            println!("{}", network.download_url(&filename)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
