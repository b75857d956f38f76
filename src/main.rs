use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sweeprun::config;
use sweeprun::errors::SweeprunError;
use sweeprun::report::{self, ReportKind};
use sweeprun::results::ResultsLog;
use sweeprun::runner;
use sweeprun::sweeps;
use sweeprun::types::Task;

#[derive(Parser)]
#[command(
    name = "sweeprun",
    version,
    about = "Run parameter sweeps against a benchmark executable and scrape the results"
)]
struct Cli {
    /// Path to the benchmark executable (overrides the config file)
    #[arg(long, global = true)]
    executable: Option<String>,

    /// Path to the results file (overrides the config file)
    #[arg(long, global = true)]
    results: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the generated task list and its completion status
    List {
        /// Only tasks whose name contains this substring
        #[arg(long)]
        filter: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Execute pending tasks and append their output to the results file
    Run {
        /// Only tasks whose name contains this substring
        #[arg(long)]
        filter: Option<String>,

        /// Worker thread count; 0 spawns one thread per pending task
        #[arg(short, long, default_value_t = 0)]
        jobs: usize,

        /// Print what would run without executing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Scrape the results file and print the extracted tuples
    Report {
        kind: ReportKind,

        #[arg(long)]
        json: bool,
    },
}

fn filtered_tasks(filter: Option<&str>) -> Vec<Task> {
    let mut tasks = sweeps::all_tasks();
    if let Some(needle) = filter {
        tasks.retain(|t| t.name.contains(needle));
    }
    tasks
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::resolve(cli.executable, cli.results)?;

    match cli.command {
        Command::List { filter, json } => {
            let tasks = filtered_tasks(filter.as_deref());
            let completed = ResultsLog::new(&settings.results_file).completed_names()?;

            if json {
                println!("{}", report::format_task_list_json(&tasks, &completed));
            } else {
                print!("{}", report::format_task_list(&tasks, &completed));
            }
        }
        Command::Run {
            filter,
            jobs,
            dry_run,
        } => {
            let tasks = filtered_tasks(filter.as_deref());
            let executable = settings.executable()?;
            let log = Arc::new(ResultsLog::new(&settings.results_file));

            if dry_run {
                let completed = log.completed_names()?;
                for task in tasks.iter().filter(|t| !completed.contains(&t.name)) {
                    println!("{}: {}", task.name, task.command);
                }
                return Ok(());
            }

            let summary = runner::run_pending(&tasks, executable, log, jobs)?;
            println!("{} executed, {} skipped", summary.executed, summary.skipped);
        }
        Command::Report { kind, json } => {
            let contents = std::fs::read_to_string(&settings.results_file).map_err(|e| {
                SweeprunError::ResultsReadError {
                    path: settings.results_file.clone(),
                    source: e,
                }
            })?;
            let rows = report::scrape(&contents, kind);

            if json {
                println!("{}", report::format_tuples_json(&rows));
            } else {
                println!("{}", report::format_tuples(&rows));
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
