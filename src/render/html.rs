use crate::render::{BoardView, ColumnView, TicketView, ADD_TICKET_LABEL, DELETE_LABEL};

/// Serializes a view tree to HTML markup
pub fn to_html(view: &BoardView) -> String {
    let mut out = String::from(r#"<div class="board-container">"#);
    for column in &view.columns {
        write_column(&mut out, column);
    }
    out.push_str("</div>");
    out
}

fn write_column(out: &mut String, column: &ColumnView) {
    out.push_str(&format!(
        r#"<div class="column" data-column-id="{}"><div class="column-title">{}</div><button class="add-ticket-button">{}</button><div class="ticket-list">"#,
        escape(column.id.as_str()),
        escape(&column.title),
        escape(ADD_TICKET_LABEL),
    ));
    for ticket in &column.tickets {
        write_ticket(out, ticket);
    }
    out.push_str("</div></div>");
}

fn write_ticket(out: &mut String, ticket: &TicketView) {
    out.push_str(&format!(
        r#"<div class="ticket" draggable="true" data-ticket-id="{}"><h4 contenteditable="true">{}</h4><p contenteditable="true">{}</p><div class="action-buttons"><button class="cancel-button">{}</button></div></div>"#,
        escape(ticket.id.as_str()),
        escape(&ticket.title),
        escape(&ticket.description),
        DELETE_LABEL,
    ));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
