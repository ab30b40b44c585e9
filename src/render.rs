//! The seam between the search and whatever displays it. A [Renderer] is handed the grid and the
//! cells that changed after every step and decides how to show them.

use std::io::Write;

use log::warn;

use crate::pathing_grid::PathingGrid;
use crate::solver::StepReport;

pub trait Renderer {
    fn render(&mut self, grid: &PathingGrid, report: &StepReport);
}

/// Keeps every report it receives.
#[derive(Clone, Debug, Default)]
pub struct ChangeLog {
    pub reports: Vec<StepReport>,
}

impl Renderer for ChangeLog {
    fn render(&mut self, _grid: &PathingGrid, report: &StepReport) {
        self.reports.push(report.clone());
    }
}

/// Writes the whole grid as text after every step that changed something.
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    frames: usize,
    failed: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> TextRenderer<W> {
        TextRenderer {
            out,
            frames: 0,
            failed: false,
        }
    }
    /// Number of frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, grid: &PathingGrid, report: &StepReport) {
        if self.failed || report.changes.is_empty() {
            return;
        }
        // A broken output stops the drawing, never the search.
        if let Err(e) = write!(self.out, "{}\n{}", report.status, grid) {
            warn!("Text renderer stopped after {} frames: {}", self.frames, e);
            self.failed = true;
            return;
        }
        self.frames += 1;
    }
}
