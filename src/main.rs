use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail, eyre};
use log::info;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;

mod cli;

use cli::Cli;
use cli::commands::Commands;
use cli::input::{load_answers, prompt_answers, validate_start};
use cli::render::{assignment_summary, loading_message, progress_line, results_dashboard};
use tutor_loop::api::{HttpLoopApi, LoopApi};
use tutor_loop::config::Config;
use tutor_loop::domain::{Outcome, Stage};
use tutor_loop::orchestrator::{LoopOrchestrator, StageEvent};

fn setup_logging(default_level: Option<&str>) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tutor-loop")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("tutor-loop.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let env = env_logger::Env::default().default_filter_or(default_level.unwrap_or("info"));
    env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// Turn a rolled back or discarded operation into an error for the user
fn require_settled(outcome: Outcome) -> Result<Stage> {
    match outcome {
        Outcome::Settled(stage) => Ok(stage),
        Outcome::RolledBack { error, .. } => bail!(error),
        Outcome::Discarded => bail!("Loop was reset before the request completed"),
    }
}

/// Print the loading message for an in-flight stage
fn announce(stage: Stage) {
    if let Some(message) = loading_message(stage) {
        println!("{}", message.cyan());
    }
}

/// Print transitions received since the last call (verbose mode)
fn drain_events(events: &mut broadcast::Receiver<StageEvent>, verbose: bool) {
    while let Ok(event) = events.try_recv() {
        if verbose {
            println!("  {} {} → {}", "stage:".dimmed(), event.from, event.to);
        }
    }
}

fn show_progress(stage: Stage) {
    if let Some(line) = progress_line(stage) {
        println!("{}", line);
    }
}

async fn start<A: LoopApi>(
    orchestrator: &LoopOrchestrator<A>,
    student_id: u64,
    topics: Vec<String>,
    events: &mut broadcast::Receiver<StageEvent>,
    verbose: bool,
) -> Result<()> {
    println!(
        "Starting new learning loop for student {} with topics: {}",
        student_id,
        topics.join(", ")
    );
    announce(Stage::Assigning);
    let outcome = orchestrator.start_loop(student_id, topics).await?;
    drain_events(events, verbose);
    show_progress(require_settled(outcome)?);

    let state = orchestrator.snapshot();
    let pack = state
        .learning_pack
        .ok_or_else(|| eyre!("Loop settled without a learning pack"))?;
    println!("{}", assignment_summary(&state, &pack));
    Ok(())
}

async fn handle_start_command<A: LoopApi>(
    orchestrator: &LoopOrchestrator<A>,
    student_id: u64,
    topics: Vec<String>,
    verbose: bool,
) -> Result<()> {
    let mut events = orchestrator.subscribe();
    start(orchestrator, student_id, topics, &mut events, verbose).await
}

async fn handle_run_command<A: LoopApi>(
    orchestrator: &LoopOrchestrator<A>,
    student_id: u64,
    topics: Vec<String>,
    answers_path: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut events = orchestrator.subscribe();
    start(orchestrator, student_id, topics, &mut events, verbose).await?;

    announce(Stage::GeneratingExam);
    let outcome = orchestrator.generate_test().await?;
    drain_events(&mut events, verbose);
    show_progress(require_settled(outcome)?);

    let exam = orchestrator
        .snapshot()
        .exam
        .ok_or_else(|| eyre!("Loop settled without an exam"))?;
    println!(
        "{} exam {} with {} questions",
        "Mock Exam:".green(),
        exam.exam_id,
        exam.questions.len()
    );

    let answers = match answers_path {
        Some(path) => load_answers(path)?,
        None => prompt_answers(&exam, io::stdin().lock(), io::stdout()).context("Failed to read answers")?,
    };

    announce(Stage::Diagnosing);
    let outcome = orchestrator.submit_test(answers).await?;
    drain_events(&mut events, verbose);
    show_progress(require_settled(outcome)?);

    let result = orchestrator
        .snapshot()
        .result
        .ok_or_else(|| eyre!("Loop settled without a result"))?;
    println!("{}", results_dashboard(&result));
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("  API: {}", config.api.base_url);
    }

    let api = HttpLoopApi::new(config.api.http_config()).context("Failed to create API client")?;
    let orchestrator = LoopOrchestrator::new(Arc::new(api));
    let default_student = config.cli.default_student_id;

    match &cli.command {
        Commands::Start { student_id, topics } => {
            let (student_id, topics) = validate_start(*student_id, default_student, topics)?;
            handle_start_command(&orchestrator, student_id, topics, cli.is_verbose()).await
        }
        Commands::Run {
            student_id,
            topics,
            answers,
        } => {
            let (student_id, topics) = validate_start(*student_id, default_student, topics)?;
            handle_run_command(
                &orchestrator,
                student_id,
                topics,
                answers.as_deref(),
                cli.is_verbose(),
            )
            .await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref())
        .context("Failed to load configuration")?
        .with_api_url(cli.api_url.as_deref());

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
