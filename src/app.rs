//! Event handling for a board shown to a single user.
//!
//! [`App`] owns the board, the drag gesture and a renderer. Each
//! [`UiEvent`] mutates the board synchronously and, if anything changed,
//! re-renders before returning.

use crate::dnd::{DragController, DragState, DropOutcome, DropTarget};
use crate::domain::{Board, ColumnId, TicketId};
use crate::error::Result;
use crate::export;
use crate::render::{BoardView, FullRenderer, Renderer};
use std::io::{self, Write};
use tracing::{debug, warn};

/// A user action on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    AddTicket {
        column_id: ColumnId,
    },
    DeleteTicket {
        ticket_id: TicketId,
        column_id: ColumnId,
    },
    /// Title field lost focus
    EditTitle {
        ticket_id: TicketId,
        value: String,
    },
    /// Description field lost focus
    EditDescription {
        ticket_id: TicketId,
        value: String,
    },
    DragStart {
        ticket_id: TicketId,
    },
    Drop {
        target: DropTarget,
    },
    /// Released outside any drop target
    DragCancel,
    PrintToConsole,
}

pub struct App<R: Renderer = FullRenderer> {
    board: Board,
    drag: DragController,
    renderer: R,
    console: Box<dyn Write>,
}

impl App<FullRenderer> {
    pub fn new(board: Board) -> Self {
        Self::with_renderer(board, FullRenderer::new())
    }
}

impl Default for App<FullRenderer> {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl<R: Renderer> App<R> {
    /// Creates an app and performs the initial render
    pub fn with_renderer(board: Board, mut renderer: R) -> Self {
        renderer.render(&board);
        Self {
            board,
            drag: DragController::new(),
            renderer,
            console: Box::new(io::stdout()),
        }
    }

    /// Redirects "Print to console" output
    pub fn with_console(mut self, console: Box<dyn Write>) -> Self {
        self.console = console;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn view(&self) -> &BoardView {
        self.renderer.view()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Current board state as JSON
    pub fn snapshot(&self) -> Result<serde_json::Value> {
        export::snapshot(&self.board)
    }

    /// Handles one event.
    ///
    /// Events naming tickets or columns that no longer exist are logged and
    /// dropped. Only export failures are returned.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<()> {
        debug!(?event, "dispatch");
        let changed = match event {
            UiEvent::AddTicket { column_id } => {
                degrade(self.board.add_ticket(&column_id))?.is_some()
            }
            UiEvent::DeleteTicket {
                ticket_id,
                column_id,
            } => degrade(self.board.delete_ticket(&ticket_id, &column_id))?.unwrap_or(false),
            UiEvent::EditTitle { ticket_id, value } => {
                degrade(self.board.update_ticket_title(&ticket_id, value))?.is_some()
            }
            UiEvent::EditDescription { ticket_id, value } => {
                degrade(self.board.update_ticket_description(&ticket_id, value))?.is_some()
            }
            UiEvent::DragStart { ticket_id } => {
                if self.board.ticket(&ticket_id).is_some() {
                    self.drag.start(ticket_id);
                } else {
                    warn!(ticket = %ticket_id, "drag started on unknown ticket");
                }
                false
            }
            UiEvent::Drop { target } => {
                let outcome = degrade(self.drag.drop_on(&mut self.board, target))?;
                matches!(outcome, Some(DropOutcome::Moved { .. }))
            }
            UiEvent::DragCancel => {
                self.drag.cancel();
                false
            }
            UiEvent::PrintToConsole => {
                export::print_to_console(&self.board, &mut self.console)?;
                false
            }
        };

        if changed {
            self.renderer.render(&self.board);
        }
        Ok(())
    }
}

/// Turns lookup failures into logged no-ops
fn degrade<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_lookup() => {
            warn!(error = %err, "event ignored");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

impl<R: Renderer> std::fmt::Debug for App<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("board", &self.board)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}
