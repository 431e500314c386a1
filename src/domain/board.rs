use crate::domain::ticket::{Ticket, TicketId};
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use tracing::debug;

/// Identifier of a board column (e.g., column-1)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A column and the ordered ids of the tickets it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub ticket_ids: Vec<TicketId>,
}

impl Column {
    pub fn new(id: ColumnId, title: String) -> Self {
        Self {
            id,
            title,
            ticket_ids: Vec::new(),
        }
    }

    pub fn contains(&self, ticket_id: &TicketId) -> bool {
        self.ticket_ids.contains(ticket_id)
    }

    fn position_of(&self, ticket_id: &TicketId) -> Option<usize> {
        self.ticket_ids.iter().position(|id| id == ticket_id)
    }
}

/// Configuration entry for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub id: String,
    pub title: String,
}

impl ColumnConfig {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
        }
    }
}

/// Board configuration: the fixed set of columns, in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub columns: Vec<ColumnConfig>,
}

impl BoardConfig {
    /// Parses a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Default Board".to_string(),
            columns: vec![
                ColumnConfig::new("column-1", "To Do"),
                ColumnConfig::new("column-2", "In Progress"),
                ColumnConfig::new("column-3", "Done"),
            ],
        }
    }
}

/// Normalized kanban board state.
///
/// Tickets are owned by `tickets`; columns only reference them by id.
/// Every mutation keeps three invariants: each referenced id exists in
/// `tickets`, each id sits in at most one column, and `column_order` lists
/// exactly the keys of `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: BTreeMap<ColumnId, Column>,
    pub tickets: BTreeMap<TicketId, Ticket>,
    pub column_order: Vec<ColumnId>,
    pub next_ticket_number: u32,
}

impl Board {
    /// Builds an empty board from a configuration
    pub fn new(config: BoardConfig) -> Result<Self> {
        let (board, duplicate) = Self::build(config);
        match duplicate {
            Some(id) => Err(KanbanError::DuplicateColumn(id.to_string())),
            None => Ok(board),
        }
    }

    /// Lays out columns in config order. The first repeated column id is
    /// reported alongside the board; later repeats are skipped.
    fn build(config: BoardConfig) -> (Self, Option<ColumnId>) {
        let mut columns = BTreeMap::new();
        let mut column_order = Vec::with_capacity(config.columns.len());
        let mut duplicate = None;

        for entry in config.columns {
            let id = ColumnId::new(entry.id);
            if columns.contains_key(&id) {
                if duplicate.is_none() {
                    duplicate = Some(id);
                }
                continue;
            }
            column_order.push(id.clone());
            columns.insert(id.clone(), Column::new(id, entry.title));
        }

        let board = Self {
            columns,
            tickets: BTreeMap::new(),
            column_order,
            next_ticket_number: 1,
        };
        (board, duplicate)
    }

    /// Generates the next unused ticket ID
    pub fn next_ticket_id(&mut self) -> TicketId {
        loop {
            let id = TicketId::new(self.next_ticket_number);
            self.next_ticket_number += 1;
            if !self.tickets.contains_key(&id) {
                return id;
            }
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.get(id)
    }

    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    /// Columns in display order
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
    }

    /// Finds the column currently holding a ticket
    pub fn find_column_of(&self, ticket_id: &TicketId) -> Option<&ColumnId> {
        self.column_order
            .iter()
            .find(|id| self.columns.get(*id).is_some_and(|c| c.contains(ticket_id)))
    }

    /// Creates a ticket with default content at the end of a column
    pub fn add_ticket(&mut self, column_id: &ColumnId) -> Result<TicketId> {
        if !self.columns.contains_key(column_id) {
            return Err(KanbanError::ColumnNotFound(column_id.to_string()));
        }

        let id = self.next_ticket_id();
        self.tickets.insert(id.clone(), Ticket::new(id.clone()));
        if let Some(column) = self.columns.get_mut(column_id) {
            column.ticket_ids.push(id.clone());
        }

        debug!(ticket = %id, column = %column_id, "ticket added");
        Ok(id)
    }

    /// Deletes a ticket. Returns `false` when there was nothing to delete.
    pub fn delete_ticket(&mut self, ticket_id: &TicketId, column_id: &ColumnId) -> Result<bool> {
        let column = self
            .columns
            .get_mut(column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound(column_id.to_string()))?;

        let mut removed = self.tickets.remove(ticket_id).is_some();

        if let Some(pos) = column.position_of(ticket_id) {
            column.ticket_ids.remove(pos);
            removed = true;
        } else {
            // Stale column hint; drop the reference wherever it lives.
            for column in self.columns.values_mut() {
                if let Some(pos) = column.position_of(ticket_id) {
                    column.ticket_ids.remove(pos);
                    removed = true;
                }
            }
        }

        if removed {
            debug!(ticket = %ticket_id, column = %column_id, "ticket deleted");
        }
        Ok(removed)
    }

    pub fn update_ticket_title(&mut self, ticket_id: &TicketId, title: String) -> Result<()> {
        self.ticket_mut(ticket_id)?.set_title(title);
        debug!(ticket = %ticket_id, "title updated");
        Ok(())
    }

    pub fn update_ticket_description(
        &mut self,
        ticket_id: &TicketId,
        description: String,
    ) -> Result<()> {
        self.ticket_mut(ticket_id)?.set_description(description);
        debug!(ticket = %ticket_id, "description updated");
        Ok(())
    }

    /// Moves a ticket to `destination_index` of the target column.
    ///
    /// The index is clamped to the target length. Reordering within one
    /// column is supported. Returns `false` when the ticket would land where
    /// it already is.
    pub fn move_ticket(
        &mut self,
        ticket_id: &TicketId,
        from: &ColumnId,
        to: &ColumnId,
        destination_index: usize,
    ) -> Result<bool> {
        if !self.columns.contains_key(to) {
            return Err(KanbanError::ColumnNotFound(to.to_string()));
        }
        let source = self
            .columns
            .get(from)
            .ok_or_else(|| KanbanError::ColumnNotFound(from.to_string()))?;
        let source_index =
            source
                .position_of(ticket_id)
                .ok_or_else(|| KanbanError::TicketNotInColumn {
                    ticket: ticket_id.to_string(),
                    column: from.to_string(),
                })?;

        if from == to {
            let index = destination_index.min(source.ticket_ids.len() - 1);
            if index == source_index {
                return Ok(false);
            }
            if let Some(column) = self.columns.get_mut(from) {
                let id = column.ticket_ids.remove(source_index);
                column.ticket_ids.insert(index, id);
            }
            debug!(ticket = %ticket_id, column = %from, from_index = source_index, to_index = index, "ticket reordered");
            return Ok(true);
        }

        if let Some(column) = self.columns.get_mut(from) {
            column.ticket_ids.remove(source_index);
        }
        if let Some(column) = self.columns.get_mut(to) {
            let index = destination_index.min(column.ticket_ids.len());
            column.ticket_ids.insert(index, ticket_id.clone());
            debug!(ticket = %ticket_id, from = %from, to = %to, index, "ticket moved");
        }
        Ok(true)
    }

    /// Verifies the normalization invariants, reporting the first violation
    pub fn check_invariants(&self) -> Result<()> {
        let mut ordered = HashSet::new();
        for id in &self.column_order {
            if !self.columns.contains_key(id) {
                return Err(KanbanError::InvariantViolation(format!(
                    "column order lists unknown column {id}"
                )));
            }
            if !ordered.insert(id) {
                return Err(KanbanError::InvariantViolation(format!(
                    "column {id} listed twice in column order"
                )));
            }
        }
        if ordered.len() != self.columns.len() {
            return Err(KanbanError::InvariantViolation(
                "column order does not list every column".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for column in self.columns.values() {
            for id in &column.ticket_ids {
                if !self.tickets.contains_key(id) {
                    return Err(KanbanError::InvariantViolation(format!(
                        "column {} references missing ticket {id}",
                        column.id
                    )));
                }
                if !seen.insert(id) {
                    return Err(KanbanError::InvariantViolation(format!(
                        "ticket {id} appears more than once"
                    )));
                }
            }
        }
        Ok(())
    }

    fn ticket_mut(&mut self, ticket_id: &TicketId) -> Result<&mut Ticket> {
        self.tickets
            .get_mut(ticket_id)
            .ok_or_else(|| KanbanError::TicketNotFound(ticket_id.to_string()))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::build(BoardConfig::default()).0
    }
}
