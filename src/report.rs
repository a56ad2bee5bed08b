//! Result reporter.
//!
//! Emits the line-oriented protocol an external orchestrator scrapes:
//!
//! ```text
//! start: 1700000000000
//! CLBG::Fannkuchredux: OK in 0.001s
//! Sort::Quick: ERR[actual=12, expected=34] in 0.250s
//! Summary: 0.2510s, 2, 1, 1
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::{RunResult, RunSummary, Verdict};

pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// `start: <epoch-ms>`, written as the very first line of a run.
    pub fn start_marker(&mut self, epoch_ms: i64) -> io::Result<()> {
        writeln!(self.out, "start: {}", epoch_ms)?;
        self.out.flush()
    }

    /// Workload name, printed before it executes so a hang is attributable.
    pub fn begin(&mut self, name: &str) -> io::Result<()> {
        write!(self.out, "{}: ", name)?;
        self.out.flush()
    }

    pub fn finish(&mut self, result: &RunResult) -> io::Result<()> {
        match result.verdict {
            Verdict::Ok => write!(self.out, "OK ")?,
            Verdict::Mismatch { actual, expected } => {
                write!(self.out, "ERR[actual={}, expected={}] ", actual, expected)?
            }
        }
        writeln!(self.out, "in {:.3}s", result.elapsed_secs)?;
        self.out.flush()
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(
            self.out,
            "Summary: {:.4}s, {}, {}, {}",
            summary.total_secs,
            summary.ok + summary.failed,
            summary.ok,
            summary.failed
        )?;
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Write `{ "<workload>": <measured seconds>, ... }` to `path`.
pub fn write_results(path: &Path, summary: &RunSummary) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&summary.timings()).map_err(io::Error::other)?;
    fs::write(path, json + "\n")?;
    tracing::info!(path = %path.display(), workloads = summary.results.len(), "Results written");
    Ok(())
}
