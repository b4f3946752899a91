//! Terminal module: Escape-sequence output and terminal mode control.
//!
//! - [`OutputBuffer`]: accumulates escape sequences for a single write
//! - [`TerminalSession`]: raw mode, cursor visibility and mouse reporting,
//!   restored on drop

mod output;
mod session;

pub use output::OutputBuffer;
pub use session::{SessionModes, TerminalSession};
