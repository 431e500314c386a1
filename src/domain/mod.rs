pub mod board;
pub mod ticket;

pub use board::{Board, BoardConfig, Column, ColumnConfig, ColumnId};
pub use ticket::{Ticket, TicketId};
