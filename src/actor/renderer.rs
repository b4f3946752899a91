//! Renderer: Owns the cell buffer and component tree and writes frames.
//!
//! A render pass recomputes layout, blanks the buffer, repaints every
//! visible component and flushes only the cells that differ from what the
//! terminal shows, in a single write. Mutations go through [`Renderer::tree_mut`]
//! or the buffer, both of which raise the shared [`RenderScheduler`] flag;
//! the event loop then calls [`Renderer::run_pending`] once per turn.

use super::messages::InputEvent;
use super::router::{InputRouter, RouteOutcome};
use super::scheduler::RenderScheduler;
use crate::buffer::{CellBuffer, FlushStats};
use crate::terminal::OutputBuffer;
use crate::widget::ComponentTree;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, warn};

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Total frames rendered.
    pub frames: u64,
    /// Total cells written across all frames.
    pub cells_written: u64,
    /// Total bytes written to the sink.
    pub bytes_written: u64,
    /// Average render time in microseconds.
    pub avg_render_us: u64,
    /// Last render time in microseconds.
    pub last_render_us: u64,
}

/// Paints a [`ComponentTree`] into a [`CellBuffer`] and flushes it to `W`.
pub struct Renderer<W: Write> {
    buffer: CellBuffer,
    tree: ComponentTree,
    scheduler: RenderScheduler,
    /// Pre-allocated output buffer.
    output: OutputBuffer,
    sink: W,
    stats: RenderStats,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer for a `width` x `height` terminal.
    ///
    /// The tree's root is resized to match and a first render is scheduled.
    pub fn new(mut tree: ComponentTree, width: u16, height: u16, sink: W) -> Self {
        let scheduler = RenderScheduler::new();
        tree.set_root_size(width, height);
        scheduler.request();
        Self {
            buffer: CellBuffer::with_scheduler(width, height, scheduler.clone()),
            tree,
            scheduler,
            output: OutputBuffer::with_capacity(65536),
            sink,
            stats: RenderStats::default(),
        }
    }

    /// The component tree.
    pub const fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Mutable access to the component tree; schedules a render.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        self.scheduler.request();
        &mut self.tree
    }

    /// The cell buffer.
    pub const fn buffer(&self) -> &CellBuffer {
        &self.buffer
    }

    /// The shared render flag.
    pub const fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// The output sink.
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// Mutable access to the output sink (for the session's escape sequences).
    pub fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Render statistics.
    pub const fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Schedule a render.
    pub fn request_render(&self) -> bool {
        self.scheduler.request()
    }

    /// Check if a render is scheduled.
    pub fn is_render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Render now if a render is scheduled.
    pub fn run_pending(&mut self) -> io::Result<Option<FlushStats>> {
        let scheduler = self.scheduler.clone();
        scheduler.run_pending(|| self.render()).transpose()
    }

    /// Run a full render pass and write the changed cells in one write.
    pub fn render(&mut self) -> io::Result<FlushStats> {
        let start = Instant::now();

        self.buffer.begin_frame();
        self.tree.render(&mut self.buffer);

        self.output.clear();
        let flushed = self.buffer.flush(&mut self.output);
        if !self.output.is_empty() {
            if let Err(e) = self.output.flush_to(&mut self.sink) {
                // The screen state is unknown now; repaint in full next frame.
                warn!(error = %e, "frame write failed");
                self.buffer.invalidate();
                return Err(e);
            }
        }
        // Writes made while painting belong to this frame.
        self.scheduler.cancel();

        let elapsed = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.cells_written += flushed.cells_written as u64;
        self.stats.bytes_written += flushed.bytes as u64;
        self.stats.last_render_us = elapsed;
        self.stats.avg_render_us = if self.stats.avg_render_us == 0 {
            elapsed
        } else {
            (self.stats.avg_render_us * 15 + elapsed) / 16
        };
        debug!(
            cells = flushed.cells_written,
            bytes = flushed.bytes,
            cursor_moves = flushed.cursor_moves,
            "frame rendered"
        );
        Ok(flushed)
    }

    /// Rebuild the buffer at the new size, resize the root and schedule a render.
    pub fn resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "renderer resized");
        self.buffer.resize(width, height);
        self.tree.set_root_size(width, height);
        self.scheduler.request();
    }

    /// Route an input event into the tree.
    ///
    /// Schedules a render when a component consumed the event and applies
    /// resizes to the buffer and root.
    pub fn dispatch(&mut self, router: &InputRouter, event: &InputEvent) -> RouteOutcome {
        let outcome = router.route(&mut self.tree, event);
        match outcome {
            RouteOutcome::Resize { width, height } => self.resize(width, height),
            RouteOutcome::Consumed => {
                self.scheduler.request();
            }
            RouteOutcome::Exit | RouteOutcome::Ignored => {}
        }
        outcome
    }

    /// Forget what the terminal shows so the next render repaints everything.
    pub fn invalidate(&mut self) {
        self.buffer.invalidate();
    }

    /// Consume the renderer, returning the tree and the sink.
    pub fn into_parts(self) -> (ComponentTree, W) {
        (self.tree, self.sink)
    }
}

impl<W: Write> std::fmt::Debug for Renderer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("buffer", &self.buffer)
            .field("pending", &self.scheduler.is_pending())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
