//! Single-line progress bar for push.

use std::io::{self, Stderr, Write};

use crate::sync::ProgressReporter;

const BAR_WIDTH: usize = 30;

/// Render `[#####-----] 5/10`.
pub fn render_bar(completed: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        width
    } else {
        completed.min(total) * width / total
    };
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(width - filled),
        completed,
        total
    )
}

/// Redraws the bar in place on a terminal-like writer.
pub struct ConsoleProgress<W: Write = Stderr> {
    out: W,
    line_open: bool,
}

impl ConsoleProgress<Stderr> {
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for ConsoleProgress<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            line_open: false,
        }
    }

    /// Terminate a bar left mid-line, e.g. after an aborted run.
    pub fn end_line(&mut self) {
        if self.line_open {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.line_open = false;
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, completed: usize, total: usize) {
        // Progress output is best effort
        let _ = write!(self.out, "\r{}", render_bar(completed, total, BAR_WIDTH));
        let _ = self.out.flush();
        self.line_open = true;
    }
}

impl<W: Write> ProgressReporter for ConsoleProgress<W> {
    fn start(&mut self, total: usize) {
        if total > 0 {
            self.draw(0, total);
        }
    }

    fn advance(&mut self, completed: usize, total: usize) {
        self.draw(completed, total);
    }

    fn finish(&mut self) {
        let _ = writeln!(self.out);
        self.line_open = false;
    }
}
