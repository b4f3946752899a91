//! Widget module: Components, their state and how they paint.
//!
//! Components live in a [`ComponentTree`], an arena keyed by [`ComponentId`].
//! Each one owns a layout node; painting resolves its style, fills its
//! background, draws variant content, recurses into children and finally
//! draws a Box border.
//!
//! # Example
//!
//! ```rust,ignore
//! use cellflex::layout::{LayoutConfig, LayoutEngine, LayoutStyle};
//! use cellflex::widget::{ComponentOptions, ComponentTree, ComponentType};
//!
//! let mut tree = ComponentTree::new(LayoutEngine::init(LayoutConfig::default()), 80, 24);
//! let title = tree.create(
//!     ComponentType::Text,
//!     ComponentOptions::new().text("Hello").layout(LayoutStyle::new().with_height(1)),
//! );
//! tree.add_child(tree.root(), title);
//! ```

mod border;
mod button;
mod component;
mod progress_bar;
mod text_input;
mod traits;
mod tree;

pub use border::{BorderGlyphs, BorderStyle};
pub use button::{ButtonState, ClickHandler};
pub use component::{
    BoxState, Component, ComponentId, ComponentKind, ComponentOptions, ComponentType,
};
pub use progress_bar::ProgressState;
pub use text_input::InputState;
pub use traits::Surface;
pub use tree::ComponentTree;
