use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Ticket {ticket} is not in column {column}")]
    TicketNotInColumn { ticket: String, column: String },

    #[error("Invalid ticket ID format: {0}")]
    InvalidTicketId(String),

    #[error("Duplicate column in board configuration: {0}")]
    DuplicateColumn(String),

    #[error("Board invariant violated: {0}")]
    InvariantViolation(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl KanbanError {
    /// Whether the error comes from an id that does not resolve on the board
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound(_) | Self::ColumnNotFound(_) | Self::TicketNotInColumn { .. }
        )
    }
}
