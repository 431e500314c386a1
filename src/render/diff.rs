use crate::domain::Board;
use crate::render::{build_view, BoardView, Renderer, TicketView};
use serde::Serialize;
use std::collections::HashSet;
use tracing::trace;

/// One edit to a view tree. Indices refer to the tree as it stands after
/// the preceding patches in the same batch have been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Patch {
    ReplaceAll(BoardView),
    SetColumnTitle {
        column: usize,
        title: String,
    },
    RemoveTicket {
        column: usize,
        index: usize,
    },
    InsertTicket {
        column: usize,
        index: usize,
        ticket: TicketView,
    },
    MoveTicket {
        column: usize,
        from: usize,
        to: usize,
    },
    UpdateTicket {
        column: usize,
        index: usize,
        title: String,
        description: String,
    },
}

/// Computes the patches turning `prev` into `next`, matching tickets by id
pub fn diff(prev: &BoardView, next: &BoardView) -> Vec<Patch> {
    let same_columns = prev.columns.len() == next.columns.len()
        && prev
            .columns
            .iter()
            .zip(&next.columns)
            .all(|(p, n)| p.id == n.id);
    if !same_columns {
        return vec![Patch::ReplaceAll(next.clone())];
    }

    let mut patches = Vec::new();
    for (column, (p, n)) in prev.columns.iter().zip(&next.columns).enumerate() {
        if p.title != n.title {
            patches.push(Patch::SetColumnTitle {
                column,
                title: n.title.clone(),
            });
        }

        let wanted: HashSet<_> = n.tickets.iter().map(|t| &t.id).collect();
        let mut working = p.tickets.clone();

        for index in (0..working.len()).rev() {
            if !wanted.contains(&working[index].id) {
                working.remove(index);
                patches.push(Patch::RemoveTicket { column, index });
            }
        }

        for (index, want) in n.tickets.iter().enumerate() {
            match working.iter().position(|t| t.id == want.id) {
                Some(from) if from == index => {}
                Some(from) => {
                    let ticket = working.remove(from);
                    working.insert(index, ticket);
                    patches.push(Patch::MoveTicket {
                        column,
                        from,
                        to: index,
                    });
                }
                None => {
                    working.insert(index, want.clone());
                    patches.push(Patch::InsertTicket {
                        column,
                        index,
                        ticket: want.clone(),
                    });
                    continue;
                }
            }

            if working[index] != *want {
                working[index] = want.clone();
                patches.push(Patch::UpdateTicket {
                    column,
                    index,
                    title: want.title.clone(),
                    description: want.description.clone(),
                });
            }
        }
    }
    patches
}

/// Applies patches produced by [`diff`] in order.
///
/// `view` must be the `prev` tree the batch was computed from; indices are
/// not bounds-checked.
pub(crate) fn apply(view: &mut BoardView, patches: &[Patch]) {
    for patch in patches {
        match patch {
            Patch::ReplaceAll(next) => *view = next.clone(),
            Patch::SetColumnTitle { column, title } => {
                view.columns[*column].title = title.clone();
            }
            Patch::RemoveTicket { column, index } => {
                view.columns[*column].tickets.remove(*index);
            }
            Patch::InsertTicket {
                column,
                index,
                ticket,
            } => {
                view.columns[*column].tickets.insert(*index, ticket.clone());
            }
            Patch::MoveTicket { column, from, to } => {
                let tickets = &mut view.columns[*column].tickets;
                let ticket = tickets.remove(*from);
                tickets.insert(*to, ticket);
            }
            Patch::UpdateTicket {
                column,
                index,
                title,
                description,
            } => {
                let ticket = &mut view.columns[*column].tickets[*index];
                ticket.title = title.clone();
                ticket.description = description.clone();
            }
        }
    }
}

/// Patches the previous tree instead of rebuilding it. The patches of the
/// last render are kept for hosts that mirror them onto a live document.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    view: BoardView,
    last_patches: Vec<Patch>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_patches(&self) -> &[Patch] {
        &self.last_patches
    }
}

impl Renderer for DiffRenderer {
    fn render(&mut self, board: &Board) -> &BoardView {
        let next = build_view(board);
        self.last_patches = diff(&self.view, &next);
        apply(&mut self.view, &self.last_patches);
        trace!(patches = self.last_patches.len(), "view patched");
        &self.view
    }

    fn view(&self) -> &BoardView {
        &self.view
    }
}
