//! Style module: Colors and component styling.
//!
//! - [`Color`]: named, hex and indexed terminal colors
//! - [`Style`]: a fully resolved component style
//! - [`StyleOverrides`]: sparse per-component overrides merged over defaults

mod color;
#[allow(clippy::module_inception)]
mod style;

pub use color::{Color, NamedColor};
pub use style::{Style, StyleOverrides, TextAlign};
