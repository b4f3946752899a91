//! Buffer module: The cell grid behind every frame.
//!
//! This module contains:
//! - [`Cell`]: The atomic unit of display (character plus style)
//! - [`CellBuffer`]: A grid of cells representing the terminal screen
//! - [`Modifiers`]: Text style bitflags
//! - [`diff`]: The flush pass that emits minimal ANSI sequences

#[allow(clippy::module_inception)]
mod buffer;
mod cell;
pub mod diff;

pub use buffer::CellBuffer;
pub use cell::{Cell, CellFlags, CellStyle, Modifiers};
pub use diff::FlushStats;
