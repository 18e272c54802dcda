// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::info;

/// A sink for the free-text progress lines a workflow writes at each
/// decision point.
///
/// Lines are observational. Workflows never read them back.
pub trait WorkflowLog {
    fn write_line(&mut self, line: &str);
}

/// Collects lines in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLog {
    lines: Vec<String>,
}

impl MemoryLog {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Counts the lines containing `needle`.
    #[must_use]
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines.iter().filter(|line| line.contains(needle)).count()
    }
}

impl WorkflowLog for MemoryLog {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Forwards lines to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl WorkflowLog for TracingLog {
    fn write_line(&mut self, line: &str) {
        info!(target: "contract_line::workflow", "{}", line);
    }
}
