//! "Print to console" export of board state.

use crate::domain::{Board, Column, ColumnId, Ticket, TicketId};
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

/// Externally visible shape of a board: its columns, tickets and column order
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot<'a> {
    pub columns: &'a BTreeMap<ColumnId, Column>,
    pub tickets: &'a BTreeMap<TicketId, Ticket>,
    pub column_order: &'a [ColumnId],
}

impl<'a> From<&'a Board> for BoardSnapshot<'a> {
    fn from(board: &'a Board) -> Self {
        Self {
            columns: &board.columns,
            tickets: &board.tickets,
            column_order: &board.column_order,
        }
    }
}

pub fn snapshot(board: &Board) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(BoardSnapshot::from(board))?)
}

pub fn to_json_pretty(board: &Board) -> Result<String> {
    Ok(serde_json::to_string_pretty(&BoardSnapshot::from(board))?)
}

/// Writes the pretty-printed snapshot followed by a newline
pub fn print_to_console<W: Write>(board: &Board, out: &mut W) -> Result<()> {
    let json = to_json_pretty(board)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    info!(tickets = board.tickets.len(), "board exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_snapshot_of_empty_board() {
        let value = snapshot(&Board::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "columns": {
                    "column-1": { "id": "column-1", "title": "To Do", "ticketIds": [] },
                    "column-2": { "id": "column-2", "title": "In Progress", "ticketIds": [] },
                    "column-3": { "id": "column-3", "title": "Done", "ticketIds": [] }
                },
                "tickets": {},
                "columnOrder": ["column-1", "column-2", "column-3"]
            })
        );
    }

    #[test]
    fn test_snapshot_lists_tickets() {
        let mut board = Board::default();
        let id = board.add_ticket(&ColumnId::from("column-2")).unwrap();
        let value = snapshot(&board).unwrap();

        assert_eq!(value["columns"]["column-2"]["ticketIds"], json!(["ticket-1"]));
        assert_eq!(value["tickets"][id.as_str()]["title"], "New Ticket");
        assert_eq!(value["tickets"][id.as_str()]["description"], "Description");
        assert!(value.get("nextTicketNumber").is_none());
    }

    #[test]
    fn test_print_to_console_writes_json() {
        let mut board = Board::default();
        board.add_ticket(&ColumnId::from("column-1")).unwrap();
        let mut out = Vec::new();

        print_to_console(&board, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, snapshot(&board).unwrap());
    }
}
