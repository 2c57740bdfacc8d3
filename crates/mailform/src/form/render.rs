//! Pure layout of the form.
//!
//! ```text
//!
//!     To:
//!     john@example.com
//!
//!     From:
//!     Enter from address here...
//!     ...
//!     (ctrl + c to quit or ctrl + s to send) ->
//!     invalid email address
//! ```
//!
//! `render` has no side effects; the terminal-facing `draw` only adds the
//! hardware cursor on top of it.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use super::controller::FormState;
use super::field::Field;
use crate::theme::{Theme, UiGroup};

pub const FOOTER_HINT: &str = "(ctrl + c to quit or ctrl + s to send) ->";

const INDENT: &str = "    ";
/// Blank first line, then label / value / spacer per field.
const HEADER_LINES: u16 = 1;
const LINES_PER_FIELD: u16 = 3;

pub fn render(state: &FormState, theme: &Theme) -> Text<'static> {
    let mut lines = vec![Line::default()];
    for field in state.fields.iter() {
        lines.push(indented(Span::styled(
            field.id().label(),
            theme.style(UiGroup::Label),
        )));
        lines.push(indented(value_span(field, theme)));
        lines.push(Line::default());
    }
    lines.push(indented(Span::styled(FOOTER_HINT, theme.style(UiGroup::Hint))));
    if let Some(err) = &state.last_error {
        lines.push(indented(Span::styled(
            err.to_string(),
            theme.style(UiGroup::Error),
        )));
    }
    if let Some(failure) = &state.send_failure {
        lines.push(indented(Span::styled(
            failure.clone(),
            theme.style(UiGroup::Error),
        )));
    }
    Text::from(lines)
}

fn value_span(field: &Field, theme: &Theme) -> Span<'static> {
    if field.is_empty() {
        Span::styled(
            field.placeholder_text().to_string(),
            theme.style(UiGroup::Placeholder),
        )
    } else {
        Span::styled(field.visible_text(), theme.style(UiGroup::Text))
    }
}

fn indented(span: Span<'static>) -> Line<'static> {
    Line::from(vec![Span::raw(INDENT), span])
}

/// Terminal cell of the focused field's cursor, relative to `origin`.
/// `None` while the blink phase hides it.
pub fn cursor_position(state: &FormState, origin: Position) -> Option<Position> {
    if !state.cursor_visible {
        return None;
    }
    let field = state.fields.focused_field();
    let row = HEADER_LINES + field.id().index() as u16 * LINES_PER_FIELD + 1;
    let col = INDENT.len() + field.visual_cursor();
    Some(Position::new(
        origin.x.saturating_add(col as u16),
        origin.y.saturating_add(row),
    ))
}

pub fn draw(frame: &mut Frame<'_>, area: Rect, state: &FormState, theme: &Theme) {
    frame.render_widget(Paragraph::new(render(state, theme)), area);
    if let Some(pos) = cursor_position(state, area.as_position()) {
        if area.contains(pos) {
            frame.set_cursor_position(pos);
        }
    }
}

/// Flatten rendered text, dropping styles.
pub fn plain(text: &Text<'_>) -> String {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
