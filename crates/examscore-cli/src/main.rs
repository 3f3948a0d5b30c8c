//! examscore CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "examscore", version, about = "Multiple-choice exam scoring tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a submitted attempt
    Score {
        /// Path to the .toml exam definition
        #[arg(long)]
        exam: PathBuf,

        /// Path to the submitted answers (JSON object of question id -> answer)
        #[arg(long)]
        answers: PathBuf,

        /// Learner name recorded in the report
        #[arg(long)]
        learner: Option<String>,

        /// Minutes the learner spent on the exam
        #[arg(long)]
        time_taken: Option<u32>,

        /// Pass threshold in percent (overrides exam and config)
        #[arg(long)]
        threshold: Option<u32>,

        /// Compare answers case-insensitively
        #[arg(long)]
        case_insensitive: bool,

        /// Output directory (default: from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all, none
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate exam TOML files
    Validate {
        /// Path to exam file or directory
        #[arg(long)]
        exam: PathBuf,
    },

    /// Print the learner-facing paper (no answer key) as JSON
    Paper {
        /// Path to the .toml exam definition
        #[arg(long)]
        exam: PathBuf,

        /// Only print questions on this page
        #[arg(long)]
        page: Option<u32>,
    },

    /// List stored attempts with per-exam statistics
    Results {
        /// Directory of attempt reports (default: from config)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Output format: text, json, html
        #[arg(long, default_value = "text")]
        format: String,

        /// HTML output path (default: <dir>/results.html)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example exam
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("examscore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            exam,
            answers,
            learner,
            time_taken,
            threshold,
            case_insensitive,
            output,
            format,
            config,
        } => commands::score::execute(
            exam,
            answers,
            learner,
            time_taken,
            threshold,
            case_insensitive,
            output,
            format,
            config,
        ),
        Commands::Validate { exam } => commands::validate::execute(exam),
        Commands::Paper { exam, page } => commands::paper::execute(exam, page),
        Commands::Results {
            dir,
            format,
            output,
            config,
        } => commands::results::execute(dir, format, output, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
