//! Generation statistics for `--stats` output.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::script::Script;

/// Phase timings plus a breakdown of the generated script by command.
///
/// Created when `--stats` is passed; nothing is timed or counted otherwise.
pub struct Stats {
    total_start: Instant,
    phases: Vec<(&'static str, Duration)>,
    /// Command lines keyed by their leading verb (`load_file`, `create_curve`, ...).
    pub commands: BTreeMap<String, usize>,
    pub echo_lines: usize,
    pub blank_lines: usize,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            total_start: Instant::now(),
            phases: Vec::new(),
            commands: BTreeMap::new(),
            echo_lines: 0,
            blank_lines: 0,
        }
    }

    /// Record a completed phase with its duration.
    pub fn add_phase(&mut self, name: &'static str, duration: Duration) {
        self.phases.push((name, duration));
    }

    /// Tally every line of `script`.
    pub fn count_script(&mut self, script: &Script) {
        for line in script.lines() {
            if line.is_empty() {
                self.blank_lines += 1;
            } else if line.starts_with('#') {
                self.echo_lines += 1;
            } else {
                let verb = line.split_whitespace().next().unwrap_or(line);
                *self.commands.entry(verb.to_string()).or_insert(0) += 1;
            }
        }
    }

    pub fn command_count(&self, verb: &str) -> usize {
        self.commands.get(verb).copied().unwrap_or(0)
    }

    /// Print the stats table to stderr.
    pub fn display(&self) {
        let total = self.total_start.elapsed();
        eprintln!();
        eprintln!("=== svtcl Generation Stats ===");

        for (name, dur) in &self.phases {
            eprintln!("  {:<24} {:>8.3}ms", name, dur.as_secs_f64() * 1e3);
        }

        if !self.commands.is_empty() {
            eprintln!("  Commands:");
            for (verb, count) in &self.commands {
                eprintln!("    {:<22} {:>8}", verb, count);
            }
        }
        eprintln!("  Echo lines:             {:>8}", self.echo_lines);
        eprintln!("  Blank lines:            {:>8}", self.blank_lines);

        eprintln!("  ─────────────────────────────────");
        eprintln!("  Total:                  {:>8.3}ms", total.as_secs_f64() * 1e3);
    }
}
