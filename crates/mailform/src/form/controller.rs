//! The form state machine.
//!
//! `FormController::handle` consumes one [`FormEvent`] at a time and returns
//! the resulting [`FormStatus`]. Transitions:
//!
//! | event   | guard                    | result                                   |
//! |---------|--------------------------|------------------------------------------|
//! | Advance | focused is To/From       | validate; on error stay, else move next  |
//! | Advance | focused is Subject/Body  | move next                                |
//! | Retreat | any                      | move prev, error kept                    |
//! | Send    | no error                 | validate To/From, hand off to sender     |
//! | Send    | error pending            | nothing                                  |
//! | Quit    | any                      | terminal                                 |
//! | Edit    | any                      | edit the focused field                   |
//!
//! `Sent` and `Quit` are terminal; later events are ignored.

use tracing::{debug, error, info};

use super::field::{EditEvent, FieldId};
use super::field_set::FieldSet;
use super::validate::ValidationError;
use crate::sender::{Message, MessageSender};

/// Input to the state machine, already decoded from raw key codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Advance,
    Retreat,
    Send,
    Quit,
    Edit(EditEvent),
    /// Cursor blink; never touches focus, validation or content.
    Tick,
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing(FieldId),
    EditingWithError(FieldId, ValidationError),
    Sent,
    Quit,
}

impl FormStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FormStatus::Sent | FormStatus::Quit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Finished {
    Sent,
    Quit,
}

/// Knobs that change controller policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Drop a pending validation error as soon as the focused field is edited.
    pub clear_error_on_edit: bool,
}

/// Everything the renderer needs.
pub struct FormState {
    pub fields: FieldSet,
    pub last_error: Option<ValidationError>,
    /// Set when the sender refused the message; cleared by a successful send.
    pub send_failure: Option<String>,
    pub cursor_visible: bool,
}

impl FormState {
    pub fn new(fields: FieldSet) -> Self {
        Self {
            fields,
            last_error: None,
            send_failure: None,
            cursor_visible: true,
        }
    }

    pub fn focused(&self) -> FieldId {
        self.fields.focused()
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(FieldSet::default())
    }
}

pub struct FormController<S> {
    state: FormState,
    sender: S,
    options: FormOptions,
    finished: Option<Finished>,
}

impl<S: MessageSender> FormController<S> {
    pub fn new(sender: S) -> Self {
        Self::with_state(FormState::default(), sender)
    }

    pub fn with_state(state: FormState, sender: S) -> Self {
        Self {
            state,
            sender,
            options: FormOptions::default(),
            finished: None,
        }
    }

    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn into_sender(self) -> S {
        self.sender
    }

    pub fn status(&self) -> FormStatus {
        match (self.finished, self.state.last_error) {
            (Some(Finished::Sent), _) => FormStatus::Sent,
            (Some(Finished::Quit), _) => FormStatus::Quit,
            (None, Some(err)) => FormStatus::EditingWithError(self.state.focused(), err),
            (None, None) => FormStatus::Editing(self.state.focused()),
        }
    }

    pub fn handle(&mut self, event: FormEvent) -> FormStatus {
        if self.finished.is_some() {
            debug!(?event, "form finished, event ignored");
            return self.status();
        }
        match event {
            FormEvent::Advance => self.advance(),
            FormEvent::Retreat => {
                self.state.fields.focus_prev();
                self.state.fields.apply_focus();
            }
            FormEvent::Send => self.send(),
            FormEvent::Quit => {
                info!("Quitting...");
                self.finished = Some(Finished::Quit);
            }
            FormEvent::Edit(edit) => {
                if self.state.fields.dispatch(&edit) && self.options.clear_error_on_edit {
                    self.clear_error_for_focused();
                }
            }
            FormEvent::Tick => {
                self.state.cursor_visible = !self.state.cursor_visible;
            }
            FormEvent::Resize(_, _) => {}
        }
        self.status()
    }

    fn advance(&mut self) {
        let focused = self.state.fields.focused_field();
        if focused.id().is_address() {
            if let Err(err) = focused.validate() {
                debug!(field = %err.field(), "validation failed");
                self.state.last_error = Some(err);
                return;
            }
        }
        self.state.last_error = None;
        self.state.fields.focus_next();
        self.state.fields.apply_focus();
    }

    fn send(&mut self) {
        if self.state.last_error.is_some() {
            return;
        }
        let checked = [FieldId::To, FieldId::From]
            .into_iter()
            .try_for_each(|id| self.state.fields.field(id).validate());
        if let Err(err) = checked {
            debug!(field = %err.field(), "send blocked by validation");
            self.state.last_error = Some(err);
            return;
        }

        let message: Message = self.state.fields.message();
        match self.sender.send(&message) {
            Ok(()) => {
                self.state.send_failure = None;
                self.finished = Some(Finished::Sent);
            }
            Err(err) => {
                error!(%err, "failed to send message");
                self.state.send_failure = Some(err.to_string());
            }
        }
    }

    fn clear_error_for_focused(&mut self) {
        if self
            .state
            .last_error
            .is_some_and(|err| err.field() == self.state.focused())
        {
            self.state.last_error = None;
        }
    }
}
