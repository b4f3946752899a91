//! Components: The closed set of UI node variants.
//!
//! Every component shares one record (id, visibility, style overrides,
//! content, layout node, children) and carries its variant-specific state in
//! [`ComponentKind`]. Painting and input handling dispatch on the variant tag.

use super::border::BorderStyle;
use super::button::{ButtonState, ClickHandler};
use super::progress_bar::ProgressState;
use super::text_input::InputState;
use crate::layout::{LayoutStyle, NodeId};
use crate::style::StyleOverrides;
use tracing::warn;

/// Handle to a component in a [`ComponentTree`](super::ComponentTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

/// Component variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    /// Plain component: background and content only.
    Base,
    /// Container with an optional border.
    Box,
    /// Static text.
    Text,
    /// Single-line editable input.
    Input,
    /// Clickable button.
    Button,
    /// Horizontal progress bar.
    ProgressBar,
}

impl ComponentType {
    /// Resolve a type name case-insensitively.
    ///
    /// Unknown names resolve to [`ComponentType::Base`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "box" => Self::Box,
            "text" => Self::Text,
            "input" => Self::Input,
            "button" => Self::Button,
            "progressbar" => Self::ProgressBar,
            "base" | "component" => Self::Base,
            _ => {
                warn!(name, "unknown component type, using base component");
                Self::Base
            }
        }
    }
}

/// Construction options shared by every component type.
///
/// Fields that do not apply to the requested type are ignored.
#[derive(Default)]
pub struct ComponentOptions {
    /// Lookup id; empty means unregistered.
    pub id: String,
    /// Free-form class name.
    pub class_name: String,
    /// Initial visibility (default visible).
    pub hidden: bool,
    /// Content string painted at the component origin.
    pub content: String,
    /// Style overrides.
    pub style: StyleOverrides,
    /// Layout style of the component's node.
    pub layout: LayoutStyle,
    /// Text component text.
    pub text: Option<String>,
    /// Input value.
    pub value: String,
    /// Input placeholder.
    pub placeholder: String,
    /// Input focus.
    pub focus: bool,
    /// Button label.
    pub label: Option<String>,
    /// Button click callback.
    pub on_click: Option<ClickHandler>,
    /// Box border.
    pub border: bool,
    /// Box border line style.
    pub border_style: BorderStyle,
    /// Progress bar value (clamped).
    pub progress: f64,
    /// Hide the progress bar label.
    pub hide_label: bool,
}

impl ComponentOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lookup id (builder pattern).
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the class name (builder pattern).
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Start hidden (builder pattern).
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Set the content (builder pattern).
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Set the style overrides (builder pattern).
    #[must_use]
    pub const fn style(mut self, style: StyleOverrides) -> Self {
        self.style = style;
        self
    }

    /// Set the layout style (builder pattern).
    #[must_use]
    pub const fn layout(mut self, layout: LayoutStyle) -> Self {
        self.layout = layout;
        self
    }

    /// Set Text text (builder pattern).
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the Input value (builder pattern).
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the Input placeholder (builder pattern).
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set Input focus (builder pattern).
    #[must_use]
    pub const fn focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }

    /// Set the Button label (builder pattern).
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the Button click callback (builder pattern).
    #[must_use]
    pub fn on_click(mut self, on_click: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Enable a Box border (builder pattern).
    #[must_use]
    pub const fn border(mut self, style: BorderStyle) -> Self {
        self.border = true;
        self.border_style = style;
        self
    }

    /// Set the progress value (builder pattern).
    #[must_use]
    pub const fn progress(mut self, value: f64) -> Self {
        self.progress = value;
        self
    }

    /// Hide the progress label (builder pattern).
    #[must_use]
    pub const fn hide_label(mut self) -> Self {
        self.hide_label = true;
        self
    }
}

impl std::fmt::Debug for ComponentOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentOptions")
            .field("id", &self.id)
            .field("content", &self.content)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Border settings of a Box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxState {
    /// Whether the border is drawn.
    pub border: bool,
    /// Border line style.
    pub border_style: BorderStyle,
}

/// Variant-specific component state.
#[derive(Debug)]
pub enum ComponentKind {
    /// Plain component.
    Base,
    /// Container.
    Box(BoxState),
    /// Static text (the text lives in the content).
    Text,
    /// Editable input.
    Input(InputState),
    /// Clickable button (the label lives in the content).
    Button(ButtonState),
    /// Progress bar.
    ProgressBar(ProgressState),
}

impl ComponentKind {
    /// The variant tag.
    pub const fn component_type(&self) -> ComponentType {
        match self {
            Self::Base => ComponentType::Base,
            Self::Box(_) => ComponentType::Box,
            Self::Text => ComponentType::Text,
            Self::Input(_) => ComponentType::Input,
            Self::Button(_) => ComponentType::Button,
            Self::ProgressBar(_) => ComponentType::ProgressBar,
        }
    }
}

/// A node of the component tree.
#[derive(Debug)]
pub struct Component {
    id: String,
    class_name: String,
    visible: bool,
    style: StyleOverrides,
    content: String,
    pub(super) node: NodeId,
    pub(super) parent: Option<ComponentId>,
    pub(super) children: Vec<ComponentId>,
    kind: ComponentKind,
}

impl Component {
    /// Build a component of type `ty` owning layout node `node`.
    pub(super) fn new(ty: ComponentType, options: ComponentOptions, node: NodeId) -> Self {
        let ComponentOptions {
            id,
            class_name,
            hidden,
            mut content,
            style,
            text,
            value,
            placeholder,
            focus,
            label,
            on_click,
            border,
            border_style,
            progress,
            hide_label,
            ..
        } = options;

        let kind = match ty {
            ComponentType::Base => ComponentKind::Base,
            ComponentType::Box => ComponentKind::Box(BoxState {
                border,
                border_style,
            }),
            ComponentType::Text => {
                if let Some(text) = text {
                    content = text;
                }
                ComponentKind::Text
            }
            ComponentType::Input => {
                ComponentKind::Input(InputState::new(value, placeholder, focus))
            }
            ComponentType::Button => {
                content = label.unwrap_or_else(|| "Button".to_string());
                ComponentKind::Button(ButtonState::new(on_click))
            }
            ComponentType::ProgressBar => {
                ComponentKind::ProgressBar(ProgressState::new(progress, !hide_label))
            }
        };

        Self {
            id,
            class_name,
            visible: !hidden,
            style,
            content,
            node,
            parent: None,
            children: Vec::new(),
            kind,
        }
    }

    /// The lookup id (may be empty).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The class name.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The variant tag.
    pub const fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }

    /// Variant-specific state.
    pub const fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Mutable variant-specific state.
    pub fn kind_mut(&mut self) -> &mut ComponentKind {
        &mut self.kind
    }

    /// Whether the component (and so its subtree) is painted.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The style overrides.
    pub const fn style(&self) -> &StyleOverrides {
        &self.style
    }

    /// The content string (Text text, Button label).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The layout node this component owns.
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The parent component, if attached.
    pub const fn parent(&self) -> Option<ComponentId> {
        self.parent
    }

    /// Children in insertion (paint) order.
    pub fn children(&self) -> &[ComponentId] {
        &self.children
    }

    /// Replace the content.
    pub fn set_content(&mut self, content: impl Into<String>) -> &mut Self {
        self.content = content.into();
        self
    }

    /// Merge `style` over the current overrides, last write wins per key.
    pub fn set_style(&mut self, style: &StyleOverrides) -> &mut Self {
        self.style.merge(style);
        self
    }

    /// Make the component visible.
    pub fn show(&mut self) -> &mut Self {
        self.visible = true;
        self
    }

    /// Hide the component and its subtree.
    pub fn hide(&mut self) -> &mut Self {
        self.visible = false;
        self
    }

    /// Set the text (Text) or label (Button); same as [`Self::set_content`].
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.set_content(text)
    }

    /// Set an Input's value, moving its cursor to the end. No-op for others.
    pub fn set_value(&mut self, value: impl Into<String>) -> &mut Self {
        if let ComponentKind::Input(input) = &mut self.kind {
            input.set_value(value);
        }
        self
    }

    /// Set a progress bar's value, clamped to `0..=100`. No-op for others.
    pub fn set_progress(&mut self, value: f64) -> &mut Self {
        if let ComponentKind::ProgressBar(progress) = &mut self.kind {
            progress.set_value(value);
        }
        self
    }

    /// Focus or unfocus an Input. No-op for others.
    ///
    /// Other Inputs are not unfocused; see
    /// [`ComponentTree::focus`](super::ComponentTree::focus) for that.
    pub fn set_focus(&mut self, focus: bool) -> &mut Self {
        if let ComponentKind::Input(input) = &mut self.kind {
            input.set_focus(focus);
        }
        self
    }

    /// Input state, if this is an Input.
    pub const fn as_input(&self) -> Option<&InputState> {
        match &self.kind {
            ComponentKind::Input(input) => Some(input),
            _ => None,
        }
    }

    /// Mutable Input state, if this is an Input.
    pub fn as_input_mut(&mut self) -> Option<&mut InputState> {
        match &mut self.kind {
            ComponentKind::Input(input) => Some(input),
            _ => None,
        }
    }

    /// Button state, if this is a Button.
    pub const fn as_button(&self) -> Option<&ButtonState> {
        match &self.kind {
            ComponentKind::Button(button) => Some(button),
            _ => None,
        }
    }

    /// Mutable Button state, if this is a Button.
    pub fn as_button_mut(&mut self) -> Option<&mut ButtonState> {
        match &mut self.kind {
            ComponentKind::Button(button) => Some(button),
            _ => None,
        }
    }

    /// Progress state, if this is a progress bar.
    pub const fn as_progress(&self) -> Option<&ProgressState> {
        match &self.kind {
            ComponentKind::ProgressBar(progress) => Some(progress),
            _ => None,
        }
    }

    /// Box state, if this is a Box.
    pub fn as_box_mut(&mut self) -> Option<&mut BoxState> {
        match &mut self.kind {
            ComponentKind::Box(state) => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, LayoutEngine};

    fn build(ty: ComponentType, options: ComponentOptions) -> Component {
        let mut engine = LayoutEngine::init(LayoutConfig::default());
        let node = engine.create_node(options.layout);
        Component::new(ty, options, node)
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ComponentType::from_name("ProgressBar"), ComponentType::ProgressBar);
        assert_eq!(ComponentType::from_name("BOX"), ComponentType::Box);
        assert_eq!(ComponentType::from_name("slider"), ComponentType::Base);
    }

    #[test]
    fn test_button_label_defaults() {
        let button = build(ComponentType::Button, ComponentOptions::new());
        assert_eq!(button.content(), "Button");
        let button = build(ComponentType::Button, ComponentOptions::new().label("OK"));
        assert_eq!(button.content(), "OK");
    }

    #[test]
    fn test_text_overrides_content() {
        let text = build(
            ComponentType::Text,
            ComponentOptions::new().content("ignored").text("hello"),
        );
        assert_eq!(text.content(), "hello");
    }

    #[test]
    fn test_setters_chain() {
        let mut bar = build(ComponentType::ProgressBar, ComponentOptions::new().progress(10.0));
        bar.set_progress(150.0).hide().set_content("x");
        assert!(!bar.is_visible());
        let value = bar.as_progress().map(ProgressState::value);
        assert_eq!(value, Some(100.0));
    }

    #[test]
    fn test_type_specific_setters_ignore_other_kinds() {
        let mut text = build(ComponentType::Text, ComponentOptions::new().text("a"));
        text.set_value("b").set_focus(true).set_progress(5.0);
        assert_eq!(text.content(), "a");
        assert!(text.as_input().is_none());
    }
}
