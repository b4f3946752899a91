//! # Cellflex
//!
//! Flexbox layout, a component tree and a diffing cell renderer for
//! terminal user interfaces.
//!
//! ## Core Concepts
//!
//! - **Flex layout**: an arena of layout nodes positioned by direction,
//!   justify-content and align-items
//! - **Components**: Box, Text, Input, Button and ProgressBar, each owning a
//!   layout node, painted parent-first into a cell grid
//! - **Minimal flush**: only cells that differ from what the terminal shows
//!   are written, with the smallest style transitions, in one write
//! - **Coalesced rendering**: any number of mutations in one turn produce one
//!   render
//!
//! ## Example
//!
//! ```rust,ignore
//! use cellflex::{ComponentOptions, ComponentType, Engine, EngineConfig, LayoutStyle};
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let tree = engine.tree_mut();
//! let root = tree.root();
//! let hello = tree.create(
//!     ComponentType::Text,
//!     ComponentOptions::new().text("Hello").layout(LayoutStyle::new().with_height(1)),
//! );
//! tree.add_child(root, hello);
//! engine.run(|_, _, _| {})?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod layout;
pub mod style;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{Engine, EngineConfig, InputEvent, KeyCode, KeyEvent, MouseEvent, Renderer};
pub use buffer::{Cell, CellBuffer, CellStyle, Modifiers};
pub use error::{Error, Result};
pub use layout::{LayoutConfig, LayoutEngine, LayoutStyle, Rect};
pub use style::{Color, StyleOverrides, TextAlign};
pub use widget::{ComponentId, ComponentOptions, ComponentTree, ComponentType, Surface};
