/*!
 * Process Rendering
 * Writes process records back in the process file format
 */

use crate::process::Process;
use std::fmt::Write;

/// Render one process as a single line without the trailing newline
pub fn render_process(process: &Process) -> String {
    let mut line = format!(
        "{} {} {}",
        process.name, process.arrived_at, process.burst_time
    );
    for cycle in &process.io {
        // Writing to a String cannot fail
        let _ = write!(line, " {}:{}", cycle.start_at, cycle.duration);
    }
    line
}

/// Render a process list, one line per process
pub fn render_processes(processes: &[Process]) -> String {
    processes.iter().fold(String::new(), |mut out, process| {
        out.push_str(&render_process(process));
        out.push('\n');
        out
    })
}
