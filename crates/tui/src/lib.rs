//! PetCare TUI: terminal user interface for PetCare.
//!
//! This crate provides the ratatui-based interactive session UI.
//! The UI state machine (`PetCareApp`) is terminal-free; `run_tui`
//! owns the terminal and the store.

mod app;
mod forms;
mod input_handler;
mod layout_manager;
mod render;
mod state;
mod theme;
mod views;
#[cfg(test)]
pub(crate) mod test_helpers;

pub use app::*;
pub use forms::*;
pub use input_handler::*;
pub use layout_manager::*;
pub use render::*;
pub use state::*;
pub use theme::*;
pub use views::*;
