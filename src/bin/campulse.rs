//! CamPulse CLI - Command-line interface for the CamPulse engine
//!
//! Commands:
//! - evaluate: Replay a check-in history and emit an evaluation per day
//! - predict: Forecast schedule stress for a planned day
//! - doctor: Diagnose engine health and input files

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use campulse_core::pipeline::RiskEngine;
use campulse_core::store::MemoryStore;
use campulse_core::types::{DailyLog, Evaluation, ScheduleBlock};
use campulse_core::{ENGINE_VERSION, PRODUCER_NAME};

/// CamPulse - behavioral burnout-risk engine for students
#[derive(Parser)]
#[command(name = "campulse")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Score daily check-ins for burnout risk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a check-in history and emit an evaluation per day
    Evaluate {
        /// Input file with a JSON array of daily logs (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Only print the final day's evaluation
        #[arg(long)]
        last_only: bool,
    },

    /// Forecast schedule stress for a planned day
    Predict {
        /// Input file with a JSON array of schedule blocks (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Diagnose engine health and input files
    Doctor {
        /// Check a check-in history file
        #[arg(long)]
        logs: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one evaluation per line)
    Ndjson,
    /// JSON array of evaluations
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CampulseCliError> {
    match cli.command {
        Commands::Evaluate {
            input,
            output_format,
            last_only,
        } => cmd_evaluate(&input, output_format, last_only),
        Commands::Predict { input } => cmd_predict(&input),
        Commands::Doctor { logs, json } => cmd_doctor(logs.as_deref(), json),
    }
}

fn cmd_evaluate(
    input: &PathBuf,
    output_format: OutputFormat,
    last_only: bool,
) -> Result<(), CampulseCliError> {
    let input_data = read_input(input)?;
    let mut logs: Vec<DailyLog> = serde_json::from_str(&input_data)?;

    if logs.is_empty() {
        return Err(CampulseCliError::NoLogs);
    }

    // Replay in calendar order so each evaluation sees only prior history,
    // the way the live pipeline runs once per submitted log
    logs.sort_by_key(|log| log.date);

    let engine = RiskEngine::new(MemoryStore::new());
    let mut evaluations: Vec<Evaluation> = Vec::new();

    for log in logs {
        let user_id = log.user_id;
        engine.store().insert_log(log)?;
        evaluations.push(engine.evaluate(Some(user_id))?);
    }

    if last_only {
        evaluations.drain(..evaluations.len() - 1);
    }

    print!("{}", format_output(&evaluations, &output_format)?);
    Ok(())
}

fn cmd_predict(input: &PathBuf) -> Result<(), CampulseCliError> {
    let input_data = read_input(input)?;
    let blocks: Vec<ScheduleBlock> = serde_json::from_str(&input_data)?;

    let predicted = campulse_core::predict_schedule_stress(&blocks);
    println!(
        "{}",
        serde_json::to_string(&serde_json::json!({ "predicted_stress": predicted }))?
    );
    Ok(())
}

fn cmd_doctor(logs: Option<&std::path::Path>, json: bool) -> Result<(), CampulseCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "engine_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("CamPulse version {}", ENGINE_VERSION),
    });

    if let Some(logs_path) = logs {
        if logs_path.exists() {
            match fs::read_to_string(logs_path) {
                Ok(content) => match serde_json::from_str::<Vec<DailyLog>>(&content) {
                    Ok(parsed) => {
                        let invalid = parsed.iter().filter(|l| l.validate().is_err()).count();
                        let status = if invalid == 0 {
                            CheckStatus::Ok
                        } else {
                            CheckStatus::Error
                        };
                        checks.push(DoctorCheck {
                            name: "logs".to_string(),
                            status,
                            message: format!(
                                "{} logs parsed, {} with out-of-range ratings",
                                parsed.len(),
                                invalid
                            ),
                        });
                    }
                    Err(e) => {
                        checks.push(DoctorCheck {
                            name: "logs".to_string(),
                            status: CheckStatus::Error,
                            message: format!("Invalid logs JSON: {}", e),
                        });
                    }
                },
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "logs".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Cannot read logs file: {}", e),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "logs".to_string(),
                status: CheckStatus::Warning,
                message: "Logs file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: ENGINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("CamPulse Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(CampulseCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &PathBuf) -> Result<String, CampulseCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn format_output(
    evaluations: &[Evaluation],
    format: &OutputFormat,
) -> Result<String, CampulseCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for evaluation in evaluations {
                lines.push(serde_json::to_string(evaluation)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(evaluations)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(evaluations)?),
    }
}

// Error types

#[derive(Debug)]
enum CampulseCliError {
    Io(io::Error),
    Engine(campulse_core::EngineError),
    Json(serde_json::Error),
    NoLogs,
    DoctorFailed,
}

impl From<io::Error> for CampulseCliError {
    fn from(e: io::Error) -> Self {
        CampulseCliError::Io(e)
    }
}

impl From<campulse_core::EngineError> for CampulseCliError {
    fn from(e: campulse_core::EngineError) -> Self {
        CampulseCliError::Engine(e)
    }
}

impl From<serde_json::Error> for CampulseCliError {
    fn from(e: serde_json::Error) -> Self {
        CampulseCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<CampulseCliError> for CliError {
    fn from(e: CampulseCliError) -> Self {
        match e {
            CampulseCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            CampulseCliError::Engine(e) => CliError {
                code: "ENGINE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check ratings are 1-5 and user ids are UUIDs".to_string()),
            },
            CampulseCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            CampulseCliError::NoLogs => CliError {
                code: "NO_LOGS".to_string(),
                message: "No logs found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            CampulseCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
