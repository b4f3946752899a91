//! Widget Demo: Showcases the component tree.
//!
//! Demonstrates:
//! - A bordered Box laid out with flex rows and columns
//! - An Input with placeholder and cursor editing
//! - A Button with hover/press styling and a click callback
//! - A ProgressBar driven by button clicks
//!
//! Press Enter to submit the input, Esc or Ctrl+C to exit. Logs go to
//! `cellflex-demo.log` (filter with `RUST_LOG`).

use cellflex::actor::RouteOutcome;
use cellflex::layout::{AlignItems, FlexDirection, JustifyContent};
use cellflex::widget::{BorderStyle, Component, ComponentId};
use cellflex::{
    Color, ComponentOptions, ComponentTree, ComponentType, Engine, EngineConfig, InputEvent,
    KeyCode, LayoutStyle, StyleOverrides, TextAlign,
};
use std::cell::Cell;
use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

struct Ids {
    status: ComponentId,
    prompt: ComponentId,
    progress: ComponentId,
}

fn init_logging() {
    let Ok(file) = File::create("cellflex-demo.log") else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}

fn build_ui(tree: &mut ComponentTree, clicks: &Rc<Cell<u32>>) -> Ids {
    let root = tree.root();

    let title = tree.create(
        ComponentType::Text,
        ComponentOptions::new()
            .text("cellflex widgets demo")
            .style(
                StyleOverrides::new()
                    .bold(true)
                    .text_align(TextAlign::Center)
                    .background(Color::rgb(0x1e, 0x3a, 0x5f)),
            )
            .layout(LayoutStyle::new().with_height(1)),
    );
    tree.add_child(root, title);

    let panel = tree.create(
        ComponentType::Box,
        ComponentOptions::new()
            .border(BorderStyle::Double)
            .layout(
                LayoutStyle::new()
                    .with_size(60, 9)
                    .with_direction(FlexDirection::Column)
                    .with_justify(JustifyContent::SpaceAround)
                    .with_align(AlignItems::Center),
            ),
    );
    tree.add_child(root, panel);

    let prompt = tree.create(
        ComponentType::Input,
        ComponentOptions::new()
            .id("prompt")
            .placeholder("Type something and press Enter")
            .style(StyleOverrides::new().cursor(Color::BLACK, Color::WHITE))
            .layout(LayoutStyle::new().with_size(50, 1)),
    );
    tree.add_child(panel, prompt);

    let row = tree.create(
        ComponentType::Box,
        ComponentOptions::new().layout(
            LayoutStyle::new()
                .with_size(50, 1)
                .with_direction(FlexDirection::Row)
                .with_justify(JustifyContent::SpaceBetween),
        ),
    );
    tree.add_child(panel, row);

    let counter = clicks.clone();
    let button = tree.create(
        ComponentType::Button,
        ComponentOptions::new()
            .label("Click me")
            .on_click(move || counter.set(counter.get() + 1))
            .layout(LayoutStyle::new().with_size(12, 1)),
    );
    tree.add_child(row, button);

    let progress = tree.create(
        ComponentType::ProgressBar,
        ComponentOptions::new().layout(LayoutStyle::new().with_size(30, 1)),
    );
    tree.add_child(row, progress);

    let status = tree.create(
        ComponentType::Text,
        ComponentOptions::new()
            .text("Esc or Ctrl+C to exit")
            .style(StyleOverrides::new().color(Color::GRAY))
            .layout(LayoutStyle::new().with_height(1)),
    );
    tree.add_child(root, status);

    tree.focus(prompt);
    Ids {
        status,
        prompt,
        progress,
    }
}

fn submit(tree: &mut ComponentTree, ids: &Ids) {
    let Some(text) = tree
        .get_mut(ids.prompt)
        .and_then(Component::as_input_mut)
        .map(|input| input.take_value())
    else {
        return;
    };
    if text.is_empty() {
        return;
    }
    if let Some(status) = tree.get_mut(ids.status) {
        status.set_text(format!("You typed: {text}"));
    }
}

fn main() -> cellflex::Result<()> {
    init_logging();

    let clicks = Rc::new(Cell::new(0));
    let mut engine = Engine::new(EngineConfig::default());
    if engine.is_inert() {
        eprintln!("no terminal available, see cellflex-demo.log");
        return Ok(());
    }
    let ids = build_ui(engine.tree_mut(), &clicks);

    let mut shown = 0;
    engine.run(|engine, event, outcome| {
        if let InputEvent::Key(key) = event {
            match key.code {
                KeyCode::Esc => engine.stop(),
                KeyCode::Enter => submit(engine.tree_mut(), &ids),
                _ => {}
            }
        }
        if outcome == RouteOutcome::Consumed && clicks.get() != shown {
            shown = clicks.get();
            if let Some(bar) = engine.tree_mut().get_mut(ids.progress) {
                bar.set_progress(f64::from(shown * 10));
            }
        }
    })?;

    engine.stop();
    Ok(())
}
