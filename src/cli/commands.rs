//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - start: create a loop and its learning pack
//! - run: drive a loop from assignment to diagnosis

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tutor-loop - assign, test and diagnose a student in one loop
#[derive(Parser, Debug)]
#[command(name = "tutor-loop")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the API base URL from config
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a new learning loop and assign a learning pack
    Start {
        /// ID of the student (defaults to cli.default_student_id from config)
        #[arg(short, long)]
        student_id: Option<u64>,

        /// Syllabus topic codes, space or comma separated (e.g. 1.1 1.2)
        #[arg(short, long, num_args = 1.., required = true)]
        topics: Vec<String>,
    },

    /// Run a full loop: assign, generate the exam, answer it and get a diagnosis
    Run {
        /// ID of the student (defaults to cli.default_student_id from config)
        #[arg(short, long)]
        student_id: Option<u64>,

        /// Syllabus topic codes, space or comma separated (e.g. 1.1 1.2)
        #[arg(short, long, num_args = 1.., required = true)]
        topics: Vec<String>,

        /// YAML file of answers ([{question_id, answer_text}]); prompts on stdin when absent
        #[arg(short, long)]
        answers: Option<PathBuf>,
    },
}
