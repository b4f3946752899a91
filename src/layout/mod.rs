//! Layout module: Flexbox geometry for a tree of nodes.
//!
//! Layout is recomputed for the whole tree on every render pass. Nodes are
//! owned by a [`LayoutEngine`] arena and referenced by [`NodeId`].

mod engine;
mod flex;
mod node;
mod rect;

pub use engine::{Backend, LayoutConfig, LayoutEngine, NodeId};
pub use node::{AlignItems, FlexDirection, JustifyContent, LayoutStyle};
pub use rect::Rect;
