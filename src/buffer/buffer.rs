//! Buffer: A grid of cells representing the terminal screen.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order. Alongside the live cells it keeps a
//! snapshot of what was last emitted to the terminal, so a cell is dirty
//! exactly when its content differs from what the screen shows.

use super::cell::{Cell, CellStyle};
use crate::actor::RenderScheduler;
use crate::widget::Surface;
use unicode_width::UnicodeWidthChar;

/// Placeholder for "terminal content unknown"; never equal to a real cell.
const UNKNOWN: Cell = Cell::new('\0');

/// A grid of cells representing the terminal screen.
///
/// Access is in row-major order: `index = y * width + x`.
#[derive(Clone)]
pub struct CellBuffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// What the terminal showed after the last flush.
    emitted: Vec<Cell>,
    /// Terminal width in columns.
    width: u16,
    /// Terminal height in rows.
    height: u16,
    /// Raised whenever a write changes a cell.
    scheduler: RenderScheduler,
}

impl CellBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells start blank and dirty: the terminal content is unknown.
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_scheduler(width, height, RenderScheduler::new())
    }

    /// Create a buffer that reports changes to an existing scheduler.
    pub fn with_scheduler(width: u16, height: u16, scheduler: RenderScheduler) -> Self {
        let size = (width as usize) * (height as usize);
        let mut blank = Cell::EMPTY;
        blank.set_dirty(true);
        Self {
            cells: vec![blank; size],
            emitted: vec![UNKNOWN; size],
            width,
            height,
            scheduler,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get the total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the buffer has no cells (zero-sized terminal).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The scheduler notified by cell writes.
    #[inline]
    pub const fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x < self.width as usize && y < self.height as usize {
            Some(y * (self.width as usize) + x)
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Number of cells waiting to be flushed.
    pub fn dirty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_dirty()).count()
    }

    /// The characters of row `y` (continuation cells omitted).
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = (y as usize) * (self.width as usize);
        self.cells[start..start + self.width as usize]
            .iter()
            .filter(|c| !c.is_wide_continuation())
            .map(Cell::ch)
            .collect()
    }

    /// Store `cell` at `idx`, updating dirty state and scheduling a render.
    ///
    /// Returns `false` when the cell already had this content.
    fn put(&mut self, idx: usize, mut cell: Cell) -> bool {
        if self.cells[idx].same_content(&cell) {
            return false;
        }
        cell.set_dirty(!cell.same_content(&self.emitted[idx]));
        self.cells[idx] = cell;
        self.scheduler.request();
        true
    }

    /// Blank every cell ahead of a full repaint.
    ///
    /// Blanking does not schedule a render; cells end up dirty only where the
    /// terminal currently shows something else.
    pub fn begin_frame(&mut self) {
        for (cell, shown) in self.cells.iter_mut().zip(&self.emitted) {
            let mut blank = Cell::EMPTY;
            blank.set_dirty(!blank.same_content(shown));
            *cell = blank;
        }
    }

    /// Forget what the terminal shows, forcing every cell to be re-emitted.
    pub fn invalidate(&mut self) {
        self.emitted.fill(UNKNOWN);
        for cell in &mut self.cells {
            cell.set_dirty(true);
        }
        self.scheduler.request();
    }

    /// Rebuild the buffer at new dimensions.
    ///
    /// Content is not preserved; every cell comes back blank and dirty.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::with_scheduler(width, height, self.scheduler.clone());
        self.scheduler.request();
    }

    /// Live cells and the emitted snapshot, for the flush pass.
    pub(crate) fn split_for_flush(&mut self) -> (&mut [Cell], &mut [Cell], u16) {
        (&mut self.cells, &mut self.emitted, self.width)
    }
}

impl Surface for CellBuffer {
    fn set_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle) -> bool {
        match self.index_of(x, y) {
            Some(idx) => self.put(idx, Cell::new(ch).with_style(style)),
            None => false,
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, style: CellStyle) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            let width = ch.width().unwrap_or(0);
            if width == 0 {
                continue;
            }
            if col >= i32::from(self.width) {
                break;
            }
            self.set_cell(col, y, ch, style);
            if width == 2 {
                if let Some(idx) = self.index_of(col + 1, y) {
                    self.put(idx, Cell::wide_continuation(style));
                }
            }
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            {
                col += width as i32;
            }
        }
        u16::try_from(col.saturating_sub(x)).unwrap_or(u16::MAX)
    }
}

impl std::fmt::Debug for CellBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dirty", &self.dirty_count())
            .finish_non_exhaustive()
    }
}
