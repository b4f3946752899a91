//! Actor module: Input, scheduling and rendering around one event loop.
//!
//! Only input polling runs on its own thread; everything else is
//! single-threaded and runs to completion per event:
//! - **Input Actor**: polls crossterm events, forwards them over a channel
//! - **Decoder**: turns host-provided raw bytes into the same events
//! - **Router**: delivers events to focused Inputs and Buttons
//! - **Scheduler**: coalesces render requests into one pass per turn
//! - **Renderer**: layout, paint, diff, single write
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐  route   ┌───────────────┐
//! │ Input Thread │ ─────────────────▶  │              │ ───────▶ │ ComponentTree │
//! └──────────────┘                     │  Event Loop  │          └───────────────┘
//! ┌──────────────┐   decode(bytes)     │   (Engine)   │                 │ request()
//! │  Host stdin  │ ─────────────────▶  │              │                 ▼
//! └──────────────┘                     └──────────────┘          ┌───────────────┐
//!                                             │ run_pending      │RenderScheduler│
//!                                             ▼                  └───────────────┘
//!                                      ┌──────────────┐
//!                                      │   Renderer   │ ──▶ one write per frame
//!                                      └──────────────┘
//! ```

pub mod decode;
mod engine;
mod input;
mod messages;
mod renderer;
mod router;
mod scheduler;

pub use engine::{Engine, EngineConfig};
pub use input::{convert_event, InputActor};
pub use messages::{
    InputEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseKind,
};
pub use renderer::{RenderStats, Renderer};
pub use router::{InputRouter, RouteOutcome};
pub use scheduler::RenderScheduler;
