//! Field identity, field definition and the low-level edit vocabulary.
//!
//! A `Field` wraps a `tui_input::Input` (cursor + content) together with the
//! immutable bits fixed at form initialization: placeholder, character limit,
//! display width and the optional validator. The `focused` flag is owned by
//! the [`FieldSet`](super::field_set::FieldSet); nothing else toggles it.

use std::fmt;

use strum::Display;
use tui_input::{Input, InputRequest};

use super::validate::{ValidationError, Validator};

/// Maximum number of characters a field accepts unless configured otherwise.
pub const DEFAULT_CHAR_LIMIT: usize = 50;
/// Visible columns of a field's value line unless configured otherwise.
pub const DEFAULT_WIDTH: usize = 50;

/// The four fields of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum FieldId {
    To,
    From,
    Subject,
    Body,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [FieldId::To, FieldId::From, FieldId::Subject, FieldId::Body];
    pub const COUNT: usize = Self::ALL.len();

    pub fn index(self) -> usize {
        self as usize
    }

    /// Wraps around, so any index maps onto a field.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldId::To => "To:",
            FieldId::From => "From:",
            FieldId::Subject => "Subject:",
            FieldId::Body => "Body:",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::To => "Enter to address here...",
            FieldId::From => "Enter from address here...",
            FieldId::Subject => "Enter subject here...",
            FieldId::Body => "Send a message...",
        }
    }

    /// Address fields are the only ones that get validated.
    pub fn is_address(self) -> bool {
        matches!(self, FieldId::To | FieldId::From)
    }
}

/// Low-level edit forwarded to the focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    Insert(char),
    Paste(String),
    DeletePrev,
    DeleteNext,
    DeletePrevWord,
    DeleteTillEnd,
    DeleteLine,
    CursorLeft,
    CursorRight,
    WordLeft,
    WordRight,
    CursorHome,
    CursorEnd,
}

/// A single editable text input.
pub struct Field {
    id: FieldId,
    placeholder: String,
    char_limit: usize,
    width: usize,
    input: Input,
    focused: bool,
    validator: Option<Validator>,
}

impl Field {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            placeholder: id.placeholder().to_string(),
            char_limit: DEFAULT_CHAR_LIMIT,
            width: DEFAULT_WIDTH,
            input: Input::default(),
            focused: false,
            validator: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit.max(1);
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Cursor position in characters from the start of the content.
    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn placeholder_text(&self) -> &str {
        &self.placeholder
    }

    pub fn limit(&self) -> usize {
        self.char_limit
    }

    pub fn has_validator(&self) -> bool {
        self.validator.is_some()
    }

    pub(crate) fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Runs the validator against the current content. Fields without a
    /// validator always pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.validator {
            Some(v) => v(self.input.value()),
            None => Ok(()),
        }
    }

    /// Replaces the content, truncated to the character limit, and parks the
    /// cursor at the end.
    pub fn set_value(&mut self, text: &str) {
        let value: String = sanitize(text).take(self.char_limit).collect();
        self.input = Input::new(value);
    }

    fn len(&self) -> usize {
        self.input.value().chars().count()
    }

    /// Applies an edit. Returns false when the edit was rejected outright,
    /// e.g. an insert into a field that is already at its limit.
    pub fn apply(&mut self, event: &EditEvent) -> bool {
        let request = match event {
            EditEvent::Insert(c) => {
                if c.is_control() || self.len() >= self.char_limit {
                    return false;
                }
                InputRequest::InsertChar(*c)
            }
            EditEvent::Paste(text) => {
                let room = self.char_limit.saturating_sub(self.len());
                let mut accepted = false;
                for c in sanitize(text).take(room) {
                    self.input.handle(InputRequest::InsertChar(c));
                    accepted = true;
                }
                return accepted;
            }
            EditEvent::DeletePrev => InputRequest::DeletePrevChar,
            EditEvent::DeleteNext => InputRequest::DeleteNextChar,
            EditEvent::DeletePrevWord => InputRequest::DeletePrevWord,
            EditEvent::DeleteTillEnd => InputRequest::DeleteTillEnd,
            EditEvent::DeleteLine => InputRequest::DeleteLine,
            EditEvent::CursorLeft => InputRequest::GoToPrevChar,
            EditEvent::CursorRight => InputRequest::GoToNextChar,
            EditEvent::WordLeft => InputRequest::GoToPrevWord,
            EditEvent::WordRight => InputRequest::GoToNextWord,
            EditEvent::CursorHome => InputRequest::GoToStart,
            EditEvent::CursorEnd => InputRequest::GoToEnd,
        };
        self.input.handle(request);
        true
    }

    fn scroll(&self) -> usize {
        // crude horizontal window; counts chars, not display columns
        let cursor = self.input.cursor();
        if cursor >= self.width {
            cursor + 1 - self.width
        } else {
            0
        }
    }

    /// The slice of the content that fits the field width with the cursor
    /// kept in view.
    pub fn visible_text(&self) -> String {
        self.input
            .value()
            .chars()
            .skip(self.scroll())
            .take(self.width)
            .collect()
    }

    /// Cursor column relative to the start of [`visible_text`](Self::visible_text).
    pub fn visual_cursor(&self) -> usize {
        self.input.cursor() - self.scroll()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("id", &self.id)
            .field("value", &self.input.value())
            .field("cursor", &self.input.cursor())
            .field("focused", &self.focused)
            .field("char_limit", &self.char_limit)
            .field("validated", &self.validator.is_some())
            .finish()
    }
}

/// Single-line fields: tabs and newlines become spaces, other control
/// characters are dropped.
fn sanitize(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().filter_map(|c| match c {
        '\t' | '\n' => Some(' '),
        c if c.is_control() => None,
        c => Some(c),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::validate::address_validator;

    fn typed(id: FieldId, text: &str) -> Field {
        let mut field = Field::new(id);
        for c in text.chars() {
            field.apply(&EditEvent::Insert(c));
        }
        field
    }

    #[test]
    fn field_order_wraps() {
        assert_eq!(FieldId::Body.next(), FieldId::To);
        assert_eq!(FieldId::To.prev(), FieldId::Body);
        assert_eq!(FieldId::from_index(5), FieldId::From);
        for id in FieldId::ALL {
            assert_eq!(id.next().prev(), id);
        }
    }

    #[test]
    fn only_to_and_from_are_addresses() {
        let addresses: Vec<_> = FieldId::ALL.into_iter().filter(|f| f.is_address()).collect();
        assert_eq!(addresses, vec![FieldId::To, FieldId::From]);
    }

    #[test]
    fn typing_appends_and_moves_cursor() {
        let field = typed(FieldId::Subject, "hello");
        assert_eq!(field.value(), "hello");
        assert_eq!(field.cursor(), 5);
    }

    #[test]
    fn cursor_edits_in_the_middle() {
        let mut field = typed(FieldId::Subject, "helo");
        field.apply(&EditEvent::CursorLeft);
        field.apply(&EditEvent::Insert('l'));
        assert_eq!(field.value(), "hello");
        field.apply(&EditEvent::CursorHome);
        field.apply(&EditEvent::DeleteNext);
        assert_eq!(field.value(), "ello");
        field.apply(&EditEvent::CursorEnd);
        field.apply(&EditEvent::DeletePrev);
        assert_eq!(field.value(), "ell");
    }

    #[test]
    fn char_limit_rejects_extra_inserts() {
        let mut field = Field::new(FieldId::Body).char_limit(3);
        assert!(field.apply(&EditEvent::Insert('a')));
        assert!(field.apply(&EditEvent::Insert('b')));
        assert!(field.apply(&EditEvent::Insert('c')));
        assert!(!field.apply(&EditEvent::Insert('d')));
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn paste_is_truncated_and_sanitized() {
        let mut field = Field::new(FieldId::Body).char_limit(6);
        assert!(field.apply(&EditEvent::Paste("ab\ncd\u{7}efgh".into())));
        assert_eq!(field.value(), "ab cde");
        assert!(!field.apply(&EditEvent::Paste("more".into())));
    }

    #[test]
    fn set_value_parks_cursor_at_end() {
        let mut field = Field::new(FieldId::To);
        field.set_value("john@example.com");
        assert_eq!(field.cursor(), "john@example.com".len());
    }

    #[test]
    fn visible_text_follows_cursor() {
        let mut field = Field::new(FieldId::Body).width(4);
        field.set_value("abcdef");
        assert_eq!(field.visible_text(), "def");
        assert_eq!(field.visual_cursor(), 3);
        field.apply(&EditEvent::CursorHome);
        assert_eq!(field.visible_text(), "abcd");
        assert_eq!(field.visual_cursor(), 0);
    }

    #[test]
    fn fields_without_validator_always_pass() {
        let field = typed(FieldId::Subject, "");
        assert!(field.validate().is_ok());
        let field = Field::new(FieldId::To).validator(address_validator(FieldId::To));
        assert!(field.validate().is_err());
    }
}
