//! Projection of board state into a view tree.
//!
//! The tree mirrors what a host displays: one section per column in
//! `column_order`, each listing its tickets in order. Two strategies keep
//! the tree current, [`FullRenderer`] and [`DiffRenderer`]; for equal board
//! state they always hold equal trees.

use crate::domain::{Board, ColumnId, Ticket, TicketId};
use serde::Serialize;

pub mod diff;
pub mod html;

pub use diff::{diff, DiffRenderer, Patch};
pub use html::to_html;

pub const ADD_TICKET_LABEL: &str = "+ Add Ticket";
pub const DELETE_LABEL: &str = "Delete";

/// Rendered board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

/// Rendered column: header, add control and ticket list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub tickets: Vec<TicketView>,
}

/// Rendered ticket card. Title and description are inline-editable and the
/// whole card is a drag handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketView {
    pub id: TicketId,
    pub title: String,
    pub description: String,
}

impl From<&Ticket> for TicketView {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id.clone(),
            title: ticket.title.clone(),
            description: ticket.description.clone(),
        }
    }
}

/// Builds the view tree for a board from scratch
pub fn build_view(board: &Board) -> BoardView {
    let columns = board
        .ordered_columns()
        .map(|column| ColumnView {
            id: column.id.clone(),
            title: column.title.clone(),
            tickets: column
                .ticket_ids
                .iter()
                .filter_map(|id| board.ticket(id))
                .map(TicketView::from)
                .collect(),
        })
        .collect();

    BoardView { columns }
}

/// Keeps a view tree in step with board state
pub trait Renderer {
    /// Brings the tree up to date with `board` and returns it
    fn render(&mut self, board: &Board) -> &BoardView;

    /// The tree produced by the last render
    fn view(&self) -> &BoardView;
}

/// Rebuilds the whole tree on every render
#[derive(Debug, Default)]
pub struct FullRenderer {
    view: BoardView,
}

impl FullRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for FullRenderer {
    fn render(&mut self, board: &Board) -> &BoardView {
        self.view = build_view(board);
        &self.view
    }

    fn view(&self) -> &BoardView {
        &self.view
    }
}
