//! essay-grader: score free-text answers against keyword tasks.

use clap::{Parser, Subcommand};
use essay_cli::output::Status;
use essay_telemetry::TelemetryConfig;
use owo_colors::OwoColorize;
use std::path::PathBuf;

mod commands;

use commands::{batch, compare, score, validate};

#[derive(Parser)]
#[command(name = "essay-grader")]
#[command(about = "Score free-text essay answers against keyword tasks")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print collected metrics as JSON when done
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one answer
    Score {
        /// Task file (TOML or JSON); searched in the working directory if omitted
        #[arg(short, long)]
        task: Option<String>,

        /// File holding the answer
        #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
        answer: Option<PathBuf>,

        /// Answer given inline
        #[arg(long)]
        text: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// List every match found
        #[arg(short, long)]
        matches: bool,

        /// Exit with code 4 when the answer does not pass
        #[arg(long)]
        fail_under_pass: bool,
    },

    /// Score every answer file in a directory
    Batch {
        /// Task file (TOML or JSON); searched in the working directory if omitted
        #[arg(short, long)]
        task: Option<String>,

        /// Directory holding the answers
        dir: PathBuf,

        /// Extension of answer files
        #[arg(long, default_value = "txt")]
        ext: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Exit with code 4 when any answer does not pass
        #[arg(long)]
        fail_under_pass: bool,
    },

    /// Check a task file for authoring mistakes
    Validate {
        /// Task file (TOML or JSON); searched in the working directory if omitted
        #[arg(short, long)]
        task: Option<String>,
    },

    /// Compare two strings with the similarity measures
    Compare {
        a: String,
        b: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = essay_telemetry::init_with_config(TelemetryConfig::for_cli(cli.verbose)) {
        Status::warning(&format!("Logging disabled: {}", e));
    }

    let result = match cli.command {
        Commands::Score {
            task,
            answer,
            text,
            json,
            matches,
            fail_under_pass,
        } => {
            let input = match (answer, text) {
                (Some(path), _) => score::AnswerInput::File(path),
                (None, Some(text)) => score::AnswerInput::Text(text),
                (None, None) => unreachable!("clap requires --answer or --text"),
            };
            score::run(task.as_deref(), input, json, matches, fail_under_pass)
        }
        Commands::Batch {
            task,
            dir,
            ext,
            json,
            fail_under_pass,
        } => batch::run(task.as_deref(), &dir, &ext, json, fail_under_pass),
        Commands::Validate { task } => validate::run(task.as_deref()),
        Commands::Compare { a, b, json } => compare::run(&a, &b, json),
    };

    let code = match result {
        Ok(code) => code,
        Err(err) => {
            Status::error(&err.to_string());
            for cause in err.chain().skip(1) {
                eprintln!("  {} {}", "caused by:".dimmed(), cause);
            }
            commands::exit_code_for(&err)
        }
    };

    if cli.stats {
        match serde_json::to_string_pretty(&essay_telemetry::metrics().export_json()) {
            Ok(stats) => eprintln!("{}", stats),
            Err(e) => Status::warning(&format!("Could not export metrics: {}", e)),
        }
    }

    std::process::exit(code);
}
