//! Engine: Main coordinator that ties the pieces together.
//!
//! The Engine is the entry point for applications using cellflex. It owns
//! the terminal session, the input thread and the renderer, and runs a
//! single-threaded event loop: take one event, route it, let the application
//! react, render once if anything asked for it.
//!
//! Setup never fails. If the terminal cannot be prepared the engine logs a
//! warning and runs inert: components can still be built and mutated, but
//! nothing is drawn and no input arrives.

use super::decode::decode;
use super::messages::InputEvent;
use super::router::{InputRouter, RouteOutcome};
use super::{InputActor, Renderer};
use crate::buffer::FlushStats;
use crate::error::Result;
use crate::layout::{LayoutConfig, LayoutEngine};
use crate::terminal::{SessionModes, TerminalSession};
use crate::widget::ComponentTree;
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{info, warn};

/// Size assumed when the terminal cannot be queried.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whether to enable mouse reporting.
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Layout engine configuration.
    pub layout: LayoutConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_mouse: true,
            alternate_screen: false,
            input_poll_timeout: Duration::from_millis(10),
            layout: LayoutConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Enable or disable mouse reporting (builder pattern).
    #[must_use]
    pub const fn with_mouse(mut self, enabled: bool) -> Self {
        self.enable_mouse = enabled;
        self
    }

    /// Use the alternate screen (builder pattern).
    #[must_use]
    pub const fn with_alternate_screen(mut self, enabled: bool) -> Self {
        self.alternate_screen = enabled;
        self
    }

    /// Set the layout configuration (builder pattern).
    #[must_use]
    pub const fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    const fn modes(&self) -> SessionModes {
        SessionModes {
            mouse: self.enable_mouse,
            alternate_screen: self.alternate_screen,
        }
    }
}

/// The main cellflex engine.
pub struct Engine {
    /// Configuration.
    config: EngineConfig,
    /// Terminal modes, restored on stop.
    session: Option<TerminalSession>,
    /// Input event receiver (absent when headless or inert).
    input_rx: Option<Receiver<InputEvent>>,
    /// Input actor handle.
    input_actor: Option<InputActor>,
    /// Events decoded from host-provided bytes.
    queued: VecDeque<InputEvent>,
    renderer: Renderer<Box<dyn Write>>,
    router: InputRouter,
    /// Whether the engine is running.
    running: bool,
    /// Whether setup failed and rendering is disabled.
    inert: bool,
}

impl Engine {
    /// Take over the terminal: raw mode, input thread, renderer on stdout.
    ///
    /// Never fails; see the module docs for the inert fallback.
    pub fn new(config: EngineConfig) -> Self {
        Self::new_with(config, Self::start)
    }

    /// Like [`Self::new`], with terminal setup supplied by `setup`.
    ///
    /// A setup error is logged and replaced by an inert engine.
    pub fn new_with(config: EngineConfig, setup: impl FnOnce(EngineConfig) -> Result<Self>) -> Self {
        match setup(config.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                warn!(error = %e, "terminal setup failed, running without a display");
                let mut engine = Self::headless(config, FALLBACK_SIZE.0, FALLBACK_SIZE.1, Box::new(io::sink()));
                engine.inert = true;
                engine
            }
        }
    }

    fn start(config: EngineConfig) -> Result<Self> {
        let (width, height) = TerminalSession::size()?;
        let session = TerminalSession::enter(config.modes())?;

        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let input_actor = InputActor::spawn(input_tx, config.input_poll_timeout)?;

        let mut engine = Self::headless(config, width, height, Box::new(io::stdout()));
        engine.session = Some(session);
        engine.input_rx = Some(input_rx);
        engine.input_actor = Some(input_actor);
        info!(width, height, "engine started");
        Ok(engine)
    }

    /// An engine that renders into `sink` and only receives input through
    /// [`Self::feed_bytes`] and [`Self::dispatch`].
    ///
    /// Used by hosts that own stdin themselves, and by tests.
    pub fn headless(config: EngineConfig, width: u16, height: u16, sink: Box<dyn Write>) -> Self {
        let tree = ComponentTree::new(LayoutEngine::init(config.layout), width, height);
        Self {
            config,
            session: None,
            input_rx: None,
            input_actor: None,
            queued: VecDeque::new(),
            renderer: Renderer::new(tree, width, height, sink),
            router: InputRouter::new(),
            running: true,
            inert: false,
        }
    }

    /// The configuration the engine was built with.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check if setup failed and the engine draws nothing.
    pub const fn is_inert(&self) -> bool {
        self.inert
    }

    /// Check if the engine is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The component tree.
    pub const fn tree(&self) -> &ComponentTree {
        self.renderer.tree()
    }

    /// Mutable access to the component tree; schedules a render.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        self.renderer.tree_mut()
    }

    /// The renderer.
    pub const fn renderer(&self) -> &Renderer<Box<dyn Write>> {
        &self.renderer
    }

    /// Queue raw terminal bytes supplied by the host.
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        self.queued.extend(decode(bytes));
    }

    /// Next input event: queued host input first, then the input thread,
    /// waiting up to `timeout`.
    pub fn next_event(&mut self, timeout: Duration) -> Option<InputEvent> {
        if let Some(event) = self.queued.pop_front() {
            return Some(event);
        }
        match self.input_rx.as_ref()?.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(InputEvent::Shutdown),
        }
    }

    /// Route one event into the tree. An exit request stops the engine.
    pub fn dispatch(&mut self, event: &InputEvent) -> RouteOutcome {
        let outcome = self.renderer.dispatch(&self.router, event);
        if outcome == RouteOutcome::Exit {
            self.running = false;
        }
        outcome
    }

    /// Render if anything scheduled a render since the last one.
    pub fn render_if_pending(&mut self) -> Result<Option<FlushStats>> {
        if self.inert {
            self.renderer.scheduler().cancel();
            return Ok(None);
        }
        Ok(self.renderer.run_pending()?)
    }

    /// Run the event loop until an exit request or [`Self::stop`].
    ///
    /// `handler` sees every event after routing, together with what routing
    /// did. Without an input thread the loop returns once queued input is
    /// drained.
    pub fn run<F>(&mut self, mut handler: F) -> Result<()>
    where
        F: FnMut(&mut Self, &InputEvent, RouteOutcome),
    {
        self.render_if_pending()?;
        while self.running {
            let timeout = self.config.input_poll_timeout;
            match self.next_event(timeout) {
                Some(event) => {
                    let outcome = self.dispatch(&event);
                    handler(self, &event, outcome);
                }
                None if self.input_rx.is_none() => break,
                None => {}
            }
            self.render_if_pending()?;
        }
        Ok(())
    }

    /// Stop the loop, join the input thread and restore the terminal.
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }
        self.input_rx = None;
        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.restore() {
                warn!(error = %e, "failed to restore terminal");
            }
            info!("engine stopped");
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("running", &self.running)
            .field("inert", &self.inert)
            .field("queued", &self.queued.len())
            .finish_non_exhaustive()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutStyle;
    use crate::widget::{Component, ComponentOptions, ComponentType};
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine() -> Engine {
        Engine::headless(EngineConfig::default(), 40, 10, Box::new(io::sink()))
    }

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert!(config.enable_mouse);
        assert!(!config.alternate_screen);
        assert_eq!(config.input_poll_timeout, Duration::from_millis(10));
        assert_eq!(config.layout.intrinsic_width, 100);
    }

    #[test]
    fn test_run_processes_fed_input() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut engine = engine();

        let tree = engine.tree_mut();
        let root = tree.root();
        let input = tree.create(
            ComponentType::Input,
            ComponentOptions::new().id("prompt").focus(true).layout(LayoutStyle::new().with_height(1)),
        );
        let button = tree.create(
            ComponentType::Button,
            ComponentOptions::new()
                .label("Send")
                .on_click(move || counter.set(counter.get() + 1))
                .layout(LayoutStyle::new().with_size(10, 1)),
        );
        tree.add_child(root, input);
        tree.add_child(root, button);

        // "hi", click at (3, 1), then Ctrl+C.
        engine.feed_bytes(b"hi\x1b[<0;4;2M\x1b[<0;4;2m\x03ignored");
        let mut seen = 0;
        engine.run(|_, _, _| seen += 1).unwrap();

        assert!(!engine.is_running());
        assert_eq!(seen, 5);
        assert_eq!(clicks.get(), 1);
        let value = engine.tree().get(input).and_then(Component::as_input).map(|i| i.value().to_string());
        assert_eq!(value.as_deref(), Some("hi"));
        assert!(engine.renderer().stats().frames >= 2);
    }

    #[test]
    fn test_run_returns_when_headless_input_drained() {
        let mut engine = engine();
        engine.feed_bytes(b"x");
        engine.run(|_, _, _| {}).unwrap();
        assert!(engine.is_running());
        assert!(engine.next_event(Duration::ZERO).is_none());
    }

    #[test]
    fn test_setup_failure_yields_inert_engine() {
        let mut engine = Engine::new_with(EngineConfig::default().with_mouse(false), |_| {
            Err(crate::error::Error::Terminal("not a tty".into()))
        });
        assert!(engine.is_inert());
        assert!(engine.is_running());
        assert!(!engine.config().enable_mouse);

        // The tree still works at the fallback size; nothing is drawn.
        let tree = engine.tree_mut();
        let root = tree.root();
        let text = tree.create(ComponentType::Text, ComponentOptions::new().text("hidden"));
        tree.add_child(root, text);
        tree.calculate_layout();
        assert_eq!(engine.tree().layout_of(root).map(|r| (r.width, r.height)), Some((80, 24)));
        assert_eq!(engine.render_if_pending().unwrap(), None);
        assert_eq!(engine.renderer().stats().frames, 0);

        // No input thread: the loop returns immediately.
        engine.run(|_, _, _| {}).unwrap();
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn test_inert_engine_draws_nothing() {
        let mut engine = engine();
        engine.inert = true;
        engine.tree_mut();
        assert_eq!(engine.render_if_pending().unwrap(), None);
        assert!(!engine.renderer().is_render_pending());
        assert_eq!(engine.renderer().stats().frames, 0);
    }
}
