use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod check;
mod run;

#[derive(Parser)]
#[clap(about = "Load, run and grade multiple-choice quizzes")]
struct QuizGrader {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a quiz file without running it
    Check {
        #[clap(short, long, value_parser, value_name = "PATH")]
        quiz_path: PathBuf,

        /// Print the validated document as JSON
        #[clap(long, action)]
        json: bool,
    },
    /// Run a quiz attempt in the terminal
    Run {
        #[clap(short, long, value_parser, value_name = "PATH")]
        quiz_path: PathBuf,

        /// Grading mode: "practice" or "exam"
        #[clap(short, long, value_parser, default_value = "exam")]
        mode: String,
    },
}

fn main() {
    pretty_env_logger::init();

    let grader = QuizGrader::parse();

    let result = match grader.command {
        Command::Check { quiz_path, json } => check::check(quiz_path, json),
        Command::Run { quiz_path, mode } => run::run(quiz_path, &mode),
    };

    if let Err(error) = result {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}
