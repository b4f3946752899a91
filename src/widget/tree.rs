//! Component Tree: Arena of components bound to a layout engine.
//!
//! The tree owns its [`LayoutEngine`] (injected at construction) and every
//! component in a flat slot table. Parent/child links are ids, so removing a
//! subtree is a walk over ids with no reference cycles. The root is a column
//! Box sized to the terminal and registered as `"root"`.

use super::component::{Component, ComponentId, ComponentKind, ComponentOptions, ComponentType};
use super::traits::Surface;
use crate::actor::{KeyEvent, MouseEvent};
use crate::buffer::CellStyle;
use crate::layout::{FlexDirection, LayoutEngine, LayoutStyle, Rect};
use crate::style::{Color, Style, TextAlign};
use std::collections::HashMap;
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

#[derive(Debug)]
struct Slot {
    generation: u32,
    component: Option<Component>,
}

/// A tree of components with a shared layout engine.
#[derive(Debug)]
pub struct ComponentTree {
    engine: LayoutEngine,
    slots: Vec<Slot>,
    free: Vec<u32>,
    ids: HashMap<String, ComponentId>,
    root: ComponentId,
}

impl ComponentTree {
    /// Lookup id of the root component.
    pub const ROOT_ID: &'static str = "root";

    /// Create a tree whose root Box is `width` x `height`.
    pub fn new(engine: LayoutEngine, width: u16, height: u16) -> Self {
        let mut tree = Self {
            engine,
            slots: Vec::new(),
            free: Vec::new(),
            ids: HashMap::new(),
            root: ComponentId {
                index: 0,
                generation: 0,
            },
        };
        tree.root = tree.create(
            ComponentType::Box,
            ComponentOptions::new().id(Self::ROOT_ID).layout(
                LayoutStyle::new()
                    .with_size(width, height)
                    .with_direction(FlexDirection::Column),
            ),
        );
        tree
    }

    /// The root component.
    #[inline]
    pub const fn root(&self) -> ComponentId {
        self.root
    }

    /// The layout engine.
    #[inline]
    pub const fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Number of live components (attached or not), root included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.component.is_some()).count()
    }

    /// Check if only the root exists.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Create a detached component.
    ///
    /// A non-empty `options.id` registers the component for [`Self::find`];
    /// a later component with the same id replaces the earlier registration.
    pub fn create(&mut self, ty: ComponentType, options: ComponentOptions) -> ComponentId {
        let node = self.engine.create_node(options.layout);
        let component = Component::new(ty, options, node);
        let lookup = (!component.id().is_empty()).then(|| component.id().to_string());

        let id = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.component = Some(component);
            ComponentId {
                index,
                generation: slot.generation,
            }
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                component: Some(component),
            });
            ComponentId {
                index,
                generation: 0,
            }
        };

        if let Some(name) = lookup {
            if self.ids.insert(name.clone(), id).is_some() {
                debug!(id = %name, "component id re-registered");
            }
        }
        id
    }

    /// Create a component from a type name; unknown names create a base component.
    pub fn create_by_name(&mut self, name: &str, options: ComponentOptions) -> ComponentId {
        self.create(ComponentType::from_name(name), options)
    }

    /// Get a component.
    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.component.as_ref())
    }

    /// Get a component mutably.
    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.component.as_mut())
    }

    /// Look up a component by its registered id.
    pub fn find(&self, id: &str) -> Option<ComponentId> {
        self.ids.get(id).copied().filter(|&c| self.get(c).is_some())
    }

    /// Look up a component by registered id and borrow it mutably.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Component> {
        let id = self.find(id)?;
        self.get_mut(id)
    }

    /// Children of a component in paint order.
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.get(id).map(Component::children).unwrap_or_default()
    }

    /// Append `child` to `parent`, moving it out of any previous parent.
    ///
    /// Returns `false` if either component is missing, `child` is the root, or
    /// the move would make a component its own ancestor.
    pub fn add_child(&mut self, parent: ComponentId, child: ComponentId) -> bool {
        if child == self.root {
            return false;
        }
        let (Some(parent_node), Some(child_node)) =
            (self.get(parent).map(Component::node), self.get(child).map(Component::node))
        else {
            return false;
        };
        if !self.engine.add_child(parent_node, child_node) {
            return false;
        }

        if let Some(old) = self.get(child).and_then(Component::parent) {
            if let Some(old) = self.get_mut(old) {
                old.children.retain(|&c| c != child);
            }
        }
        if let Some(component) = self.get_mut(child) {
            component.parent = Some(parent);
        }
        if let Some(component) = self.get_mut(parent) {
            component.children.push(child);
        }
        true
    }

    /// Detach and destroy a component and its subtree, releasing their layout
    /// nodes. Returns the number of components removed.
    ///
    /// The root cannot be removed.
    pub fn remove(&mut self, id: ComponentId) -> usize {
        if id == self.root {
            warn!("refusing to remove the root component");
            return 0;
        }
        let Some(component) = self.get(id) else {
            return 0;
        };
        let node = component.node;
        if let Some(parent) = component.parent {
            if let Some(parent) = self.get_mut(parent) {
                parent.children.retain(|&c| c != id);
            }
        }
        self.engine.release(node);
        self.drop_subtree(id)
    }

    fn drop_subtree(&mut self, id: ComponentId) -> usize {
        let Some(component) = self.get_mut(id) else {
            return 0;
        };
        let children = std::mem::take(&mut component.children);
        let mut removed = 0;
        for child in children {
            removed += self.drop_subtree(child);
        }

        let slot = &mut self.slots[id.index as usize];
        if let Some(component) = slot.component.take() {
            if self.ids.get(component.id()) == Some(&id) {
                self.ids.remove(component.id());
            }
        }
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        removed + 1
    }

    /// Replace a component's layout style.
    pub fn set_layout(&mut self, id: ComponentId, style: LayoutStyle) -> bool {
        self.get(id)
            .map(Component::node)
            .is_some_and(|node| self.engine.set_style(node, style))
    }

    /// Modify a component's layout style in place.
    pub fn update_layout(&mut self, id: ComponentId, update: impl FnOnce(&mut LayoutStyle)) -> bool {
        self.get(id)
            .map(Component::node)
            .is_some_and(|node| self.engine.update_style(node, update))
    }

    /// Resize the root to the terminal size.
    pub fn set_root_size(&mut self, width: u16, height: u16) {
        let root = self.root;
        self.update_layout(root, |style| {
            style.width = Some(width);
            style.height = Some(height);
        });
    }

    /// Recompute geometry for the whole tree.
    pub fn calculate_layout(&mut self) {
        if let Some(node) = self.get(self.root).map(Component::node) {
            self.engine.calculate_layout(node);
        }
    }

    /// Absolute geometry of a component from the last layout pass.
    pub fn layout_of(&self, id: ComponentId) -> Option<Rect> {
        self.get(id)
            .and_then(|c| self.engine.computed_layout(c.node))
    }

    /// Visible components reachable from the root, in paint order.
    fn visible_order(&self) -> Vec<ComponentId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(component) = self.get(id) else {
                continue;
            };
            if !component.is_visible() {
                continue;
            }
            order.push(id);
            stack.extend(component.children().iter().rev());
        }
        order
    }

    /// Recompute layout, then paint every visible component onto `surface`.
    ///
    /// Parents paint before children and earlier siblings before later ones,
    /// so later paint wins. A Box border is drawn after its children.
    pub fn render(&mut self, surface: &mut impl Surface) {
        self.calculate_layout();
        self.paint(self.root, surface);
    }

    fn paint(&self, id: ComponentId, surface: &mut impl Surface) {
        let Some(component) = self.get(id) else {
            return;
        };
        if !component.is_visible() {
            return;
        }
        let Some(rect) = self.engine.computed_layout(component.node) else {
            return;
        };
        let style = resolve_style(component);

        if style.has_background() {
            surface.fill(rect, ' ', CellStyle::background(style.background));
        }
        paint_content(component, rect, &style, surface);

        for &child in component.children() {
            self.paint(child, surface);
        }

        if let ComponentKind::Box(state) = component.kind() {
            if state.border {
                state.border_style.paint(surface, rect, style.cell_style());
            }
        }
    }

    /// Offer a key press to focused Inputs in tree order; the first to
    /// consume it wins.
    pub fn handle_keyboard(&mut self, event: &KeyEvent) -> bool {
        for id in self.visible_order() {
            let consumed = self
                .get_mut(id)
                .and_then(Component::as_input_mut)
                .is_some_and(|input| input.handle_key(event));
            if consumed {
                return true;
            }
        }
        false
    }

    /// Deliver a mouse event to every visible Button.
    ///
    /// Every Button sees the event so hover can leave one and enter another in
    /// a single move. Returns `true` if any Button changed state.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        let mut changed = false;
        for id in self.visible_order() {
            let Some(bounds) = self.layout_of(id) else {
                continue;
            };
            if let Some(button) = self.get_mut(id).and_then(Component::as_button_mut) {
                changed |= button.handle_mouse(bounds, event);
            }
        }
        changed
    }

    /// The first focused Input in tree order.
    pub fn focused_input(&self) -> Option<ComponentId> {
        self.visible_order().into_iter().find(|&id| {
            self.get(id)
                .and_then(Component::as_input)
                .is_some_and(|input| input.is_focused())
        })
    }

    /// Focus one Input and unfocus every other.
    ///
    /// Returns `false` (changing nothing) if `id` is not an Input.
    pub fn focus(&mut self, id: ComponentId) -> bool {
        if self.get(id).and_then(Component::as_input).is_none() {
            return false;
        }
        for slot in &mut self.slots {
            if let Some(input) = slot.component.as_mut().and_then(Component::as_input_mut) {
                if input.is_focused() {
                    input.set_focus(false);
                }
            }
        }
        if let Some(component) = self.get_mut(id) {
            component.set_focus(true);
        }
        true
    }

    /// Destroy every component and shut the layout engine down.
    ///
    /// Returns the number of layout nodes that were not owned by any
    /// component (zero when every node was released through the tree).
    pub fn shutdown(&mut self) -> usize {
        // Slots stay allocated so stale ids keep failing lookups afterwards.
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Some(component) = slot.component.take() {
                self.engine.release(component.node);
                slot.generation = slot.generation.wrapping_add(1);
                #[allow(clippy::cast_possible_truncation)]
                self.free.push(index as u32);
            }
        }
        self.ids.clear();
        self.engine.shutdown()
    }
}

/// Defaults, then the component's overrides, then Button state styling.
fn resolve_style(component: &Component) -> Style {
    let style = Style::default().apply(component.style());
    match component.kind() {
        ComponentKind::Button(button) => style.apply(&button.state_style()),
        _ => style,
    }
}

fn paint_content(component: &Component, rect: Rect, style: &Style, surface: &mut impl Surface) {
    match component.kind() {
        ComponentKind::Input(input) => {
            if input.is_empty() && !input.is_focused() {
                if !input.placeholder().is_empty() {
                    let placeholder = style.cell_style().with_fg(style.placeholder_color);
                    surface.draw_text(rect.x, rect.y, input.placeholder(), placeholder);
                }
                return;
            }
            surface.draw_text(rect.x, rect.y, input.value(), style.cell_style());
            if input.is_focused() {
                let cursor = style
                    .cell_style()
                    .with_fg(style.cursor_color.unwrap_or(style.color))
                    .with_bg(style.cursor_background.unwrap_or(style.background));
                let column = i32::try_from(input.cursor_column()).unwrap_or(i32::MAX);
                surface.set_cell(rect.x.saturating_add(column), rect.y, '_', cursor);
            }
        }
        ComponentKind::ProgressBar(progress) => {
            let filled = progress.filled_width(rect.width);
            let unfilled = if style.has_background() {
                style.background
            } else {
                Color::GRAY
            };
            let bar_at = |i: u16| if i < filled { style.fill_color } else { unfilled };
            for i in 0..rect.width {
                surface.set_cell(rect.x + i32::from(i), rect.y, ' ', CellStyle::background(bar_at(i)));
            }
            if let Some(label) = progress.label(rect.width) {
                // Label is ASCII: one column per byte.
                let start = TextAlign::Center.offset(rect.width, u16::try_from(label.len()).unwrap_or(0));
                for (i, ch) in (start..).zip(label.chars()) {
                    let cell = CellStyle::background(bar_at(i)).with_fg(style.label_color);
                    surface.set_cell(rect.x + i32::from(i), rect.y, ch, cell);
                }
            }
        }
        _ => {
            let content = component.content();
            if content.is_empty() {
                return;
            }
            let width = u16::try_from(content.width()).unwrap_or(u16::MAX);
            let x = rect.x + i32::from(style.text_align.offset(rect.width, width));
            surface.draw_text(x, rect.y, content, style.cell_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{KeyCode, MouseKind};
    use crate::buffer::CellBuffer;
    use crate::layout::{JustifyContent, LayoutConfig};
    use crate::style::StyleOverrides;
    use crate::widget::BorderStyle;
    use std::cell::Cell;
    use std::rc::Rc;

    fn tree(width: u16, height: u16) -> ComponentTree {
        ComponentTree::new(LayoutEngine::init(LayoutConfig::default()), width, height)
    }

    fn child(tree: &mut ComponentTree, ty: ComponentType, options: ComponentOptions) -> ComponentId {
        let id = tree.create(ty, options);
        let root = tree.root();
        assert!(tree.add_child(root, id));
        id
    }

    fn key(name: &str) -> KeyEvent {
        KeyEvent::new(name.parse::<KeyCode>().unwrap())
    }

    #[test]
    fn test_root_registered_and_sized() {
        let mut tree = tree(80, 24);
        assert_eq!(tree.find("root"), Some(tree.root()));
        tree.calculate_layout();
        assert_eq!(tree.layout_of(tree.root()), Some(Rect::new(0, 0, 80, 24)));

        tree.set_root_size(100, 30);
        tree.calculate_layout();
        assert_eq!(tree.layout_of(tree.root()), Some(Rect::new(0, 0, 100, 30)));
    }

    #[test]
    fn test_create_by_unknown_name_is_base() {
        let mut tree = tree(10, 5);
        let id = tree.create_by_name("carousel", ComponentOptions::new().id("c"));
        assert_eq!(tree.get(id).map(Component::component_type), Some(ComponentType::Base));
        assert_eq!(tree.find("c"), Some(id));
    }

    #[test]
    fn test_remove_releases_subtree_and_nodes() {
        let mut tree = tree(40, 10);
        let panel = child(&mut tree, ComponentType::Box, ComponentOptions::new().id("panel"));
        let text = tree.create(ComponentType::Text, ComponentOptions::new().id("label"));
        tree.add_child(panel, text);
        assert_eq!(tree.engine().live_nodes(), 3);

        assert_eq!(tree.remove(panel), 2);
        assert_eq!(tree.engine().live_nodes(), 1);
        assert!(tree.find("label").is_none());
        assert!(tree.children(tree.root()).is_empty());
        assert_eq!(tree.remove(tree.root()), 0);
    }

    #[test]
    fn test_text_alignment() {
        let mut tree = tree(10, 3);
        child(
            &mut tree,
            ComponentType::Text,
            ComponentOptions::new()
                .text("hi")
                .layout(LayoutStyle::new().with_height(1))
                .style(StyleOverrides::new().text_align(TextAlign::Right)),
        );
        let mut buffer = CellBuffer::new(10, 3);
        tree.render(&mut buffer);
        assert_eq!(buffer.row_text(0), "        hi");
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut tree = tree(10, 2);
        let text = child(
            &mut tree,
            ComponentType::Text,
            ComponentOptions::new().text("secret").layout(LayoutStyle::new().with_height(1)),
        );
        if let Some(text) = tree.get_mut(text) {
            text.hide();
        }
        let mut buffer = CellBuffer::new(10, 2);
        tree.render(&mut buffer);
        assert_eq!(buffer.row_text(0).trim(), "");
    }

    #[test]
    fn test_border_painted_after_children() {
        let mut tree = tree(10, 5);
        let panel = child(
            &mut tree,
            ComponentType::Box,
            ComponentOptions::new()
                .border(BorderStyle::Single)
                .layout(LayoutStyle::new().with_size(10, 5)),
        );
        let text = tree.create(
            ComponentType::Text,
            ComponentOptions::new().text("xxxxxxxxxx").layout(LayoutStyle::new().with_height(1)),
        );
        tree.add_child(panel, text);

        let mut buffer = CellBuffer::new(10, 5);
        tree.render(&mut buffer);
        assert_eq!(buffer.row_text(0), "┌────────┐");
        assert_eq!(buffer.row_text(2), "│        │");
        assert_eq!(buffer.row_text(4), "└────────┘");
    }

    #[test]
    fn test_input_placeholder_and_cursor() {
        let mut tree = tree(20, 2);
        let input = child(
            &mut tree,
            ComponentType::Input,
            ComponentOptions::new()
                .id("prompt")
                .placeholder("Type here")
                .layout(LayoutStyle::new().with_height(1)),
        );
        let mut buffer = CellBuffer::new(20, 2);
        tree.render(&mut buffer);
        assert_eq!(buffer.row_text(0).trim_end(), "Type here");
        assert_eq!(buffer.get(0, 0).map(|c| c.style().fg), Some(Color::GRAY));

        tree.focus(input);
        for k in ["o", "k"] {
            assert!(tree.handle_keyboard(&key(k)));
        }
        buffer.begin_frame();
        tree.render(&mut buffer);
        assert_eq!(buffer.row_text(0).trim_end(), "ok_");
    }

    #[test]
    fn test_keyboard_goes_to_first_focused_input() {
        let mut tree = tree(20, 4);
        let layout = LayoutStyle::new().with_height(1);
        let a = child(&mut tree, ComponentType::Input, ComponentOptions::new().layout(layout));
        let b = child(&mut tree, ComponentType::Input, ComponentOptions::new().layout(layout));

        assert!(!tree.handle_keyboard(&key("x")));
        tree.focus(a);
        tree.focus(b);
        assert_eq!(tree.focused_input(), Some(b));
        assert!(tree.handle_keyboard(&key("x")));

        let value = |id| tree.get(id).and_then(Component::as_input).map(|i| i.value().to_string());
        assert_eq!(value(a).as_deref(), Some(""));
        assert_eq!(value(b).as_deref(), Some("x"));
    }

    #[test]
    fn test_button_click_scenario() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut tree = tree(40, 10);
        let row = child(
            &mut tree,
            ComponentType::Box,
            ComponentOptions::new().layout(
                LayoutStyle::new()
                    .with_height(3)
                    .with_direction(FlexDirection::Row)
                    .with_justify(JustifyContent::Start),
            ),
        );
        // Spacers push the button to (5, 2).
        let spacer = tree.create(ComponentType::Base, ComponentOptions::new().layout(LayoutStyle::new().with_size(5, 1)));
        tree.add_child(row, spacer);
        let column = tree.create(ComponentType::Box, ComponentOptions::new().layout(LayoutStyle::new().with_size(10, 3)));
        tree.add_child(row, column);
        let pad = tree.create(ComponentType::Base, ComponentOptions::new().layout(LayoutStyle::new().with_size(10, 2)));
        tree.add_child(column, pad);
        let button = tree.create(
            ComponentType::Button,
            ComponentOptions::new()
                .label("OK")
                .on_click(move || counter.set(counter.get() + 1))
                .layout(LayoutStyle::new().with_size(10, 1)),
        );
        tree.add_child(column, button);
        tree.calculate_layout();
        assert_eq!(tree.layout_of(button), Some(Rect::new(5, 2, 10, 1)));

        assert!(tree.handle_mouse(&MouseEvent::new(MouseKind::Down, 7, 2)));
        assert!(tree.get(button).and_then(Component::as_button).is_some_and(|b| b.is_active()));
        assert!(tree.handle_mouse(&MouseEvent::new(MouseKind::Up, 7, 2)));
        assert_eq!(clicks.get(), 1);
        assert!(!tree.get(button).and_then(Component::as_button).is_some_and(|b| b.is_active()));
    }

    #[test]
    fn test_progress_bar_paint() {
        let mut tree = tree(10, 1);
        child(
            &mut tree,
            ComponentType::ProgressBar,
            ComponentOptions::new().progress(50.0).layout(LayoutStyle::new().with_height(1)),
        );
        let mut buffer = CellBuffer::new(10, 1);
        tree.render(&mut buffer);

        assert_eq!(buffer.row_text(0), "   50%    ");
        assert_eq!(buffer.get(0, 0).map(|c| c.style().bg), Some(Color::GREEN));
        assert_eq!(buffer.get(9, 0).map(|c| c.style().bg), Some(Color::GRAY));
        // Label keeps the bar color beneath it.
        assert_eq!(buffer.get(5, 0).map(|c| c.style().bg), Some(Color::GRAY));
    }

    #[test]
    fn test_rerender_after_text_change_is_minimal() {
        let mut tree = tree(20, 2);
        let text = child(
            &mut tree,
            ComponentType::Text,
            ComponentOptions::new().text("count: 1").layout(LayoutStyle::new().with_height(1)),
        );
        let mut buffer = CellBuffer::new(20, 2);
        let mut out = crate::terminal::OutputBuffer::new();
        tree.render(&mut buffer);
        buffer.flush(&mut out);

        if let Some(text) = tree.get_mut(text) {
            text.set_text("count: 2");
        }
        buffer.begin_frame();
        tree.render(&mut buffer);
        assert_eq!(buffer.dirty_count(), 1);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut tree = tree(20, 2);
        child(&mut tree, ComponentType::Text, ComponentOptions::new());
        tree.create(ComponentType::Text, ComponentOptions::new());
        assert_eq!(tree.shutdown(), 0);
        assert_eq!(tree.engine().live_nodes(), 0);
    }

    #[test]
    fn test_ids_stay_stale_after_shutdown() {
        let mut tree = tree(20, 2);
        let old = tree.create(ComponentType::Text, ComponentOptions::new().id("old"));
        let root = tree.root();
        tree.shutdown();

        let fresh = tree.create(ComponentType::Text, ComponentOptions::new().id("fresh"));
        assert!(tree.get(root).is_none());
        assert!(tree.get(old).is_none());
        assert!(tree.find("old").is_none());
        assert_eq!(tree.find("fresh"), Some(fresh));
    }
}
