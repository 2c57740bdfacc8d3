//! Ordered, fixed-size set of fields with focus bookkeeping.
//!
//! Exactly one field is focused at a time. `focus_next` / `focus_prev` only
//! move the index; `apply_focus` pushes it down into the fields' `focused`
//! flags. Edits go to the focused field and nowhere else.

use super::field::{DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH, EditEvent, Field, FieldId};
use super::validate::address_validator;
use crate::sender::Message;

pub struct FieldSet {
    fields: [Field; FieldId::COUNT],
    focused: FieldId,
}

impl FieldSet {
    /// To and From get the address validator, Subject and Body none.
    pub fn new(char_limit: usize, width: usize) -> Self {
        let field = |id: FieldId| {
            let f = Field::new(id).char_limit(char_limit).width(width);
            if id.is_address() {
                f.validator(address_validator(id))
            } else {
                f
            }
        };
        let mut set = Self {
            fields: FieldId::ALL.map(field),
            focused: FieldId::To,
        };
        set.apply_focus();
        set
    }

    pub fn focused(&self) -> FieldId {
        self.focused
    }

    pub fn focused_field(&self) -> &Field {
        self.field(self.focused)
    }

    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    pub fn value(&self, id: FieldId) -> &str {
        self.field(id).value()
    }

    /// Prefill a field, e.g. from the command line. Does not touch focus.
    pub fn set_value(&mut self, id: FieldId, text: &str) {
        self.fields[id.index()].set_value(text);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Unconditional; validation is the controller's business.
    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    pub fn apply_focus(&mut self) {
        for field in self.fields.iter_mut() {
            field.set_focused(false);
        }
        self.fields[self.focused.index()].set_focused(true);
    }

    /// Forwards an edit to the focused field only. Returns whether a redraw
    /// is needed.
    pub fn dispatch(&mut self, event: &EditEvent) -> bool {
        self.fields[self.focused.index()].apply(event)
    }

    /// Snapshot of the four contents in field order.
    pub fn message(&self) -> Message {
        Message {
            to: self.value(FieldId::To).to_string(),
            from: self.value(FieldId::From).to_string(),
            subject: self.value(FieldId::Subject).to_string(),
            body: self.value(FieldId::Body).to_string(),
        }
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_LIMIT, DEFAULT_WIDTH)
    }
}
