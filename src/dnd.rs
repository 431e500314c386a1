//! Drag-and-drop gesture handling.
//!
//! A gesture runs idle → dragging → dropped → idle. The dropped step is
//! resolved inside [`DragController::drop_on`] and never observed from
//! outside: the controller is idle again once it returns.

use crate::domain::{Board, ColumnId, TicketId};
use crate::error::Result;
use std::mem;
use tracing::debug;

/// Current phase of a drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { ticket_id: TicketId },
}

/// Where a ticket was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub column_id: ColumnId,
    /// Position in the target column; `None` appends
    pub index: Option<usize>,
}

impl DropTarget {
    pub fn append(column_id: ColumnId) -> Self {
        Self {
            column_id,
            index: None,
        }
    }

    pub fn at(column_id: ColumnId, index: usize) -> Self {
        Self {
            column_id,
            index: Some(index),
        }
    }
}

/// Result of resolving a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Moved {
        ticket_id: TicketId,
        from: ColumnId,
        to: ColumnId,
    },
    /// Dropped where it already was
    Unchanged,
    /// Nothing to drop, or nowhere valid to drop it
    Ignored,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Captures the dragged ticket, replacing any gesture in flight
    pub fn start(&mut self, ticket_id: TicketId) {
        debug!(ticket = %ticket_id, "drag started");
        self.state = DragState::Dragging { ticket_id };
    }

    /// Abandons the gesture. Returns whether a drag was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
        was_dragging
    }

    /// Resolves a release over `target` and applies the resulting move
    pub fn drop_on(&mut self, board: &mut Board, target: DropTarget) -> Result<DropOutcome> {
        let ticket_id = match mem::take(&mut self.state) {
            DragState::Dragging { ticket_id } => ticket_id,
            DragState::Idle => return Ok(DropOutcome::Ignored),
        };

        if board.column(&target.column_id).is_none() {
            debug!(column = %target.column_id, "drop outside a known column");
            return Ok(DropOutcome::Ignored);
        }
        let Some(from) = board.find_column_of(&ticket_id).cloned() else {
            debug!(ticket = %ticket_id, "dragged ticket no longer on the board");
            return Ok(DropOutcome::Ignored);
        };

        // Appending onto the ticket's own column leaves it where it is.
        let index = match target.index {
            Some(index) => index,
            None if from == target.column_id => return Ok(DropOutcome::Unchanged),
            None => usize::MAX,
        };
        if board.move_ticket(&ticket_id, &from, &target.column_id, index)? {
            Ok(DropOutcome::Moved {
                ticket_id,
                from,
                to: target.column_id,
            })
        } else {
            Ok(DropOutcome::Unchanged)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn col(id: &str) -> ColumnId {
        ColumnId::from(id)
    }

    fn board_with_two() -> Board {
        let mut board = Board::default();
        board.add_ticket(&col("column-1")).unwrap();
        board.add_ticket(&col("column-1")).unwrap();
        board
    }

    #[test]
    fn test_starts_idle() {
        let controller = DragController::new();
        assert_eq!(controller.state(), &DragState::Idle);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drop_across_columns_appends_by_default() {
        let mut board = board_with_two();
        board.add_ticket(&col("column-2")).unwrap();
        let mut controller = DragController::new();

        controller.start(TicketId::new(1));
        let outcome = controller
            .drop_on(&mut board, DropTarget::append(col("column-2")))
            .unwrap();

        assert_eq!(
            outcome,
            DropOutcome::Moved {
                ticket_id: TicketId::new(1),
                from: col("column-1"),
                to: col("column-2"),
            }
        );
        assert_eq!(
            board.column(&col("column-2")).unwrap().ticket_ids,
            vec![TicketId::new(3), TicketId::new(1)]
        );
        assert_eq!(controller.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_at_index_reorders_within_column() {
        let mut board = board_with_two();
        let mut controller = DragController::new();

        controller.start(TicketId::new(2));
        let outcome = controller
            .drop_on(&mut board, DropTarget::at(col("column-1"), 0))
            .unwrap();

        assert!(matches!(outcome, DropOutcome::Moved { .. }));
        assert_eq!(
            board.column(&col("column-1")).unwrap().ticket_ids,
            vec![TicketId::new(2), TicketId::new(1)]
        );
    }

    #[test]
    fn test_drop_in_place_is_unchanged() {
        let mut board = board_with_two();
        let before = board.clone();
        let mut controller = DragController::new();

        controller.start(TicketId::new(2));
        let outcome = controller
            .drop_on(&mut board, DropTarget::append(col("column-1")))
            .unwrap();

        assert_eq!(outcome, DropOutcome::Unchanged);
        assert_eq!(board, before);
    }

    #[test]
    fn test_append_onto_own_column_keeps_order() {
        let mut board = board_with_two();
        board.add_ticket(&col("column-1")).unwrap();
        let before = board.clone();
        let mut controller = DragController::new();

        controller.start(TicketId::new(1));
        let outcome = controller
            .drop_on(&mut board, DropTarget::append(col("column-1")))
            .unwrap();

        assert_eq!(outcome, DropOutcome::Unchanged);
        assert_eq!(
            board.column(&col("column-1")).unwrap().ticket_ids,
            vec![TicketId::new(1), TicketId::new(2), TicketId::new(3)]
        );
        assert_eq!(board, before);
        assert_eq!(controller.state(), &DragState::Idle);
    }

    #[test]
    fn test_drop_without_drag_is_ignored() {
        let mut board = board_with_two();
        let before = board.clone();
        let mut controller = DragController::new();

        let outcome = controller
            .drop_on(&mut board, DropTarget::append(col("column-3")))
            .unwrap();
        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(board, before);
    }

    #[test]
    fn test_drop_on_unknown_column_is_ignored() {
        let mut board = board_with_two();
        let before = board.clone();
        let mut controller = DragController::new();

        controller.start(TicketId::new(1));
        let outcome = controller
            .drop_on(&mut board, DropTarget::append(col("trash")))
            .unwrap();

        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(board, before);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_drop_of_deleted_ticket_is_ignored() {
        let mut board = board_with_two();
        let mut controller = DragController::new();

        controller.start(TicketId::new(1));
        board.delete_ticket(&TicketId::new(1), &col("column-1")).unwrap();
        let outcome = controller
            .drop_on(&mut board, DropTarget::append(col("column-2")))
            .unwrap();

        assert_eq!(outcome, DropOutcome::Ignored);
        assert!(board.column(&col("column-2")).unwrap().ticket_ids.is_empty());
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut controller = DragController::new();
        assert!(!controller.cancel());

        controller.start(TicketId::new(1));
        assert!(controller.cancel());
        assert_eq!(controller.state(), &DragState::Idle);
    }

    #[test]
    fn test_restart_replaces_captured_ticket() {
        let mut controller = DragController::new();
        controller.start(TicketId::new(1));
        controller.start(TicketId::new(2));
        assert_eq!(
            controller.state(),
            &DragState::Dragging {
                ticket_id: TicketId::new(2)
            }
        );
    }
}
