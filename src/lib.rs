//! # Kanban Core
//!
//! State, rendering and drag-and-drop handling for a three-column kanban
//! board.
//!
//! The board is a normalized in-memory structure: tickets live in one map and
//! columns refer to them by id. An [`App`] feeds UI events through the
//! mutation operations on [`Board`] and keeps a rendered [`BoardView`] in step
//! with the result. Nothing is persisted; [`export`] gives a JSON snapshot.

pub mod app;
pub mod dnd;
pub mod domain;
pub mod error;
pub mod export;
pub mod render;

// Re-export commonly used types
pub use app::{App, UiEvent};
pub use dnd::{DragController, DragState, DropOutcome, DropTarget};
pub use domain::{
    board::{Board, BoardConfig, Column, ColumnConfig, ColumnId},
    ticket::{Ticket, TicketId},
};
pub use error::{KanbanError, Result};
pub use render::{BoardView, DiffRenderer, FullRenderer, Renderer};
