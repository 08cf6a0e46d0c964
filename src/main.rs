use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use seq_kalman::evaluation::{Snapshot, TraceFormat};
use seq_kalman::tasks::FilterTask;
use seq_kalman::ui::cli::drivers::InquireDriver;
use seq_kalman::ui::cli::wizard::prompt_choice;
use seq_kalman::ui::config::{load_task_choice, save_task_choice};
use seq_kalman::ui::types::build::build_task;
use seq_kalman::ui::types::choices::TaskChoice;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON task config; the interactive wizard runs when omitted
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the estimate trace to FILE (overrides the config's trace_path)
    #[arg(long, value_name = "FILE")]
    trace_out: Option<PathBuf>,

    /// Trace format: csv, tsv or json (default: from the file extension, else csv)
    #[arg(long, value_name = "FORMAT")]
    format: Option<TraceFormat>,

    /// Save the task as a JSON config before running it
    #[arg(long, value_name = "FILE")]
    save_config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let choice = match &args.config {
        Some(path) => load_task_choice(path)?,
        None => prompt_choice::<TaskChoice, _>(&InquireDriver)?,
    };
    if let Some(path) = &args.save_config {
        save_task_choice(path, &choice)?;
        info!(path = %path.display(), "config saved");
    }

    let TaskChoice::FilterStream(params) = &choice;
    let trace_path = args.trace_out.clone().or_else(|| params.trace_path.clone());
    if trace_path.is_none() && args.format.is_some() {
        warn!("--format has no effect without a trace output path");
    }

    let (tx, rx) = mpsc::channel::<Snapshot>();
    let printer = thread::spawn(move || {
        for snapshot in rx {
            eprintln!("{snapshot}");
        }
    });

    let mut task = build_task(choice)
        .context("building filter task")?
        .with_progress(tx);
    let run = task.run().context("running filter task");
    // run() closes the progress channel on return
    printer.join().ok();
    run?;

    print_summary(&task);

    if let Some(path) = trace_path {
        let fmt = args
            .format
            .or_else(|| TraceFormat::from_path(&path))
            .unwrap_or_default();
        task.trace()
            .export(&path, fmt)
            .with_context(|| format!("writing trace to {}", path.display()))?;
        info!(path = %path.display(), format = %fmt, points = task.trace().len(), "trace written");
    }
    Ok(())
}

fn print_summary(task: &FilterTask) {
    let filter = task.filter();
    println!("started:        {}", task.started_at().unwrap_or_default());
    println!("mode:           {:?}", task.mode());
    println!(
        "samples:        {} ({} missing)",
        task.processed(),
        task.skipped()
    );
    println!("estimate:       {:.4}", filter.estimate());
    println!("error variance: {:.6}", filter.error_variance());
    if let Some(gain) = filter.gain() {
        println!("last gain:      {gain:.6}");
    }
    for m in task.evaluator().performance() {
        println!("{:<28}{:.6}", m.name, m.value);
    }
}

/// Initialize logging subsystem
fn init_logging(verbose: bool) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if verbose {
        subscriber.with_max_level(tracing::Level::DEBUG).init();
        info!("Verbose logging enabled (DEBUG level)");
    } else {
        subscriber.with_max_level(tracing::Level::INFO).init();
    }
}
