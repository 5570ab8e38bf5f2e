use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use bep_verify::{
    CheckStatus, FileReportWriter, ProjectStatus, ProjectStore, ReportWriter, VerificationRecord, Verifier,
    VerifierConfig, payload_schema,
};

/// BEP-Verify CLI: rule-based conformance checking of BIM Execution Plans
#[derive(Parser, Debug)]
#[command(name = "bep-verify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify a model summary against a project's BEP
    #[command(name = "verify")]
    Verify {
        #[command(flatten)]
        args: VerifyArgs,
    },

    /// Print the JSON Schema of the model summary payload
    #[command(name = "schema")]
    Schema,

    /// List projects in the project store
    #[command(name = "projects")]
    Projects {
        /// Override the project store directory
        #[arg(long)]
        projects_dir: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show saved verification records for a project, newest first
    #[command(name = "history")]
    History {
        /// Project code
        #[arg(short, long)]
        project: String,

        /// Override the reports directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Parser, Debug)]
struct VerifyArgs {
    /// Project code
    #[arg(short, long)]
    project: String,

    /// Path to the model summary JSON file ("-" reads stdin)
    #[arg(short, long)]
    model: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the project store directory
    #[arg(long)]
    projects_dir: Option<PathBuf>,

    /// Override the reports directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to print on stdout
    #[arg(long, value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Do not save the report and record
    #[arg(long)]
    no_save: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Verify { args }) => handle_verify_command(args).await,
        Some(Command::Schema) => handle_schema_command(),
        Some(Command::Projects {
            projects_dir,
            config,
        }) => handle_projects_command(projects_dir, config),
        Some(Command::History {
            project,
            output,
            config,
        }) => handle_history_command(project, output, config).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!("Example: bep-verify verify --project SJ-01 --model summary.json");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so the report on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn read_model_payload(path: &PathBuf) -> Result<serde_json::Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read model summary from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .context(format!("Failed to read model summary: {:?}", path))?
    };

    serde_json::from_str(&content).context(format!("Model summary is not valid JSON: {:?}", path))
}

async fn handle_verify_command(args: VerifyArgs) -> Result<()> {
    init_logging(args.verbose);

    info!("BEP-Verify starting");

    // Load configuration
    let mut config = VerifierConfig::load_or_default(args.config.as_ref())?;

    // Apply CLI overrides
    if let Some(dir) = args.projects_dir {
        config.store.projects_dir = dir;
    }
    if let Some(dir) = args.output {
        config.output.reports_dir = dir;
    }

    let store = ProjectStore::new(config.store.projects_dir.clone());
    let record = store.load(&args.project)?;
    let payload = read_model_payload(&args.model)?;

    let verifier = Verifier::new(config.rules.clone());
    let outcome = verifier.verify(record.as_ref(), &args.project, &payload)?;

    match args.format {
        OutputFormat::Markdown => print!("{}", outcome.report_markdown),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if args.no_save {
        info!("Skipping save (--no-save)");
    } else {
        let previous_status = record.as_ref().map(|r| r.status()).unwrap_or(ProjectStatus::New);
        let saved = VerificationRecord::new(
            &args.project,
            &outcome,
            previous_status,
            chrono::Utc::now().to_rfc3339(),
        );
        let writer = FileReportWriter::new(config.output.clone());
        let path = writer.write_record(&saved).await?;
        info!(
            "Project status: {} -> {}",
            saved.previous_status.label(),
            saved.project_status.label()
        );
        eprintln!("Report saved to {:?}", path);
    }

    if outcome.summary.overall_status == CheckStatus::Fail {
        warn!(
            "BEP verification failed: {} of {} checks failed",
            outcome.summary.fail_count, outcome.summary.total_checks
        );
        std::process::exit(1);
    }

    Ok(())
}

fn handle_schema_command() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&payload_schema())?);
    Ok(())
}

fn handle_projects_command(projects_dir: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let config = VerifierConfig::load_or_default(config.as_ref())?;
    let root = projects_dir.unwrap_or(config.store.projects_dir);

    let listings = ProjectStore::new(root.clone()).list()?;
    if listings.is_empty() {
        println!("No projects found in {:?}", root);
        return Ok(());
    }

    for listing in listings {
        let marker = if listing.has_bep { "BEP" } else { "no BEP" };
        println!("{}\t{}", listing.project_code, marker);
    }
    Ok(())
}

async fn handle_history_command(
    project: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let mut config = VerifierConfig::load_or_default(config.as_ref())?;
    if let Some(dir) = output {
        config.output.reports_dir = dir;
    }

    let writer = FileReportWriter::new(config.output);
    let records = writer.history(&project).await?;
    if records.is_empty() {
        println!("No verification records for {}", project);
        return Ok(());
    }

    for record in records {
        println!(
            "{}\t{} {}\t{} checks, {} fail, {} warning\t{}",
            record.verified_at,
            record.summary_status.glyph(),
            record.summary_status.as_str(),
            record.total_checks,
            record.fail_count,
            record.warning_count,
            record.project_status.label()
        );
    }
    Ok(())
}
