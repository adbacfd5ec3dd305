/*!
 * sched-sim - Command Line Host
 *
 * Parses a process file, runs it under a scheduling policy and prints
 * the resulting timeline. Timelines can be saved as sessions and replayed.
 */

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};
use sched_sim::core::limits::{DEFAULT_QUANTUM_TICKS, ENV_POLICY, ENV_QUANTUM};
use sched_sim::parser::render_process;
use sched_sim::{
    init_tracing, parse_source, Engine, GrammarVariant, Process, SchedulingPolicy, Session,
    SimConfig, SimError, Snapshot, TimeQuantum, Timeline, TimelineStats,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sched-sim")]
#[command(about = "Simulate single-core CPU scheduling of a process file")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a process file and print its timeline
    Run {
        /// Process description file
        file: PathBuf,

        /// Scheduling policy: fcfs, sjf or rr
        #[arg(long, short, env = ENV_POLICY, default_value = "fcfs")]
        policy: String,

        /// Round-robin quantum in ticks
        #[arg(long, short, env = ENV_QUANTUM, default_value_t = DEFAULT_QUANTUM_TICKS)]
        quantum: u64,

        /// Parse with the grammar that has no I/O pairs
        #[arg(long)]
        no_io: bool,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Save the timeline as a replayable session
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Continue replaying a saved session
    Replay {
        session: PathBuf,

        /// Frames to advance (default: all remaining)
        #[arg(long)]
        steps: Option<usize>,

        /// Write the new replay position back to the session file
        #[arg(long)]
        save: bool,
    },

    /// Parse a process file and list its processes
    Check {
        file: PathBuf,

        #[arg(long)]
        no_io: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            file,
            policy,
            quantum,
            no_io,
            format,
            save,
        } => {
            let config = SimConfig::new(SchedulingPolicy::from_str(&policy)?)
                .with_quantum(TimeQuantum::new(quantum)?)
                .with_grammar(grammar(no_io));
            run(&file, &config, format, save.as_deref())
        }
        Command::Replay {
            session,
            steps,
            save,
        } => replay(&session, steps, save),
        Command::Check { file, no_io } => check(&file, grammar(no_io)),
    }
}

fn grammar(no_io: bool) -> GrammarVariant {
    if no_io {
        GrammarVariant::WithoutIo
    } else {
        GrammarVariant::WithIo
    }
}

fn load_processes(path: &Path, grammar: GrammarVariant) -> Result<Vec<Process>> {
    let source =
        fs::read_to_string(path).map_err(|e| SimError::io(path.display().to_string(), e))?;
    Ok(parse_source(&source, grammar)?)
}

fn run(path: &Path, config: &SimConfig, format: Format, save: Option<&Path>) -> Result<()> {
    let processes = load_processes(path, config.grammar)?;
    info!(
        file = %path.display(),
        processes = processes.len(),
        policy = config.policy.as_str(),
        quantum = config.quantum.as_ticks(),
        "starting simulation"
    );

    let timeline = Engine::from_config(processes, config).run();

    match format {
        Format::Table => {
            print_frames(0, timeline.snapshots());
            print_stats(&timeline);
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&timeline).into_diagnostic()?);
        }
    }

    if let Some(target) = save {
        Session::new(config.policy, config.quantum, timeline).save(target)?;
    }
    Ok(())
}

fn replay(path: &Path, steps: Option<usize>, save: bool) -> Result<()> {
    let mut session = Session::load(path)?;
    println!(
        "policy {} quantum {}",
        session.policy,
        session.quantum.as_ticks()
    );

    print_frames(0, session.displayed());
    let start = session.displayed().len();
    let shown = session.advance_by(steps.unwrap_or(usize::MAX));
    print_frames(start, &session.displayed()[start..]);

    let (done, total) = session.progress();
    println!("advanced {} frames ({}/{})", shown, done, total);
    if session.is_finished() {
        print_stats(&session.timeline());
    }

    if save {
        session.save(path)?;
    }
    Ok(())
}

fn check(path: &Path, grammar: GrammarVariant) -> Result<()> {
    let processes = load_processes(path, grammar)?;
    for process in &processes {
        println!("{}", render_process(process));
    }
    println!("{} processes", processes.len());
    Ok(())
}

fn print_frames(first_tick: usize, frames: &[Snapshot]) {
    let Some(header) = frames.first() else {
        return;
    };
    let widths: Vec<usize> = header
        .iter()
        .map(|p| p.name.len().max("NOT ARRIVED(00)".len()))
        .collect();

    let mut line = format!("{:>5}", "tick");
    for (process, width) in header.iter().zip(&widths) {
        line.push_str(&format!(" | {:<width$}", process.name, width = *width));
    }
    println!("{}", line);

    for (offset, frame) in frames.iter().enumerate() {
        let mut line = format!("{:>5}", first_tick + offset);
        for (process, width) in frame.iter().zip(&widths) {
            let cell = format!("{}({})", process.state, process.burst_time);
            line.push_str(&format!(" | {:<width$}", cell, width = *width));
        }
        println!("{}", line);
    }
}

fn print_stats(timeline: &Timeline) {
    let stats = TimelineStats::from_timeline(timeline);
    println!();
    println!(
        "{:<12} {:>8} {:>6} {:>10} {:>10} {:>8} {:>10}",
        "process", "arrival", "cpu", "dispatches", "completion", "waiting", "turnaround"
    );
    for p in &stats.processes {
        println!(
            "{:<12} {:>8} {:>6} {:>10} {:>10} {:>8} {:>10}",
            p.name,
            p.arrived_at,
            p.cpu_ticks,
            p.dispatches,
            show(p.completion),
            show(p.waiting),
            show(p.turnaround)
        );
    }
    println!(
        "ticks {} busy {} idle {} utilization {:.1}% avg waiting {:.2} avg turnaround {:.2}",
        stats.total_ticks,
        stats.busy_ticks,
        stats.idle_ticks,
        stats.utilization() * 100.0,
        stats.average_waiting,
        stats.average_turnaround
    );
}

fn show(value: Option<u64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
