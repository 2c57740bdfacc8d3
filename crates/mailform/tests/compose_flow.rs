use mailform::form::{
    EditEvent, FieldId, FormController, FormEvent, FormState, FormStatus, ValidationError,
    render::{plain, render},
};
use mailform::sender::{Message, MessageSender, SendError};
use mailform::theme::Theme;
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recording {
    calls: Vec<Message>,
}

impl MessageSender for Recording {
    fn send(&mut self, message: &Message) -> Result<(), SendError> {
        self.calls.push(message.clone());
        Ok(())
    }
}

fn type_text(c: &mut FormController<&mut Recording>, text: &str) -> FormStatus {
    let mut status = c.status();
    for ch in text.chars() {
        status = c.handle(FormEvent::Edit(EditEvent::Insert(ch)));
    }
    status
}

#[test]
fn compose_and_send() {
    let mut sender = Recording::default();
    let mut c = FormController::new(&mut sender);

    type_text(&mut c, "a@b.com");
    assert_eq!(c.handle(FormEvent::Advance), FormStatus::Editing(FieldId::From));
    type_text(&mut c, "c@d.com");
    assert_eq!(c.handle(FormEvent::Advance), FormStatus::Editing(FieldId::Subject));
    assert_eq!(c.handle(FormEvent::Advance), FormStatus::Editing(FieldId::Body));
    assert_eq!(c.handle(FormEvent::Advance), FormStatus::Editing(FieldId::To));
    assert_eq!(c.handle(FormEvent::Send), FormStatus::Sent);

    // Later input changes nothing.
    assert_eq!(c.handle(FormEvent::Send), FormStatus::Sent);
    drop(c);

    assert_eq!(
        sender.calls,
        vec![Message {
            to: "a@b.com".into(),
            from: "c@d.com".into(),
            subject: String::new(),
            body: String::new(),
        }]
    );
}

#[test]
fn retreat_cycles_through_all_fields() {
    let mut sender = Recording::default();
    let mut c = FormController::new(&mut sender);
    let seen: Vec<FieldId> = (0..4)
        .map(|_| match c.handle(FormEvent::Retreat) {
            FormStatus::Editing(id) => id,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        seen,
        vec![FieldId::Body, FieldId::Subject, FieldId::From, FieldId::To]
    );
}

#[test]
fn invalid_from_is_reported_and_rendered() {
    let mut sender = Recording::default();
    let mut c = FormController::new(&mut sender);
    type_text(&mut c, "a@b.com");
    c.handle(FormEvent::Advance);
    type_text(&mut c, "nobody");
    let status = c.handle(FormEvent::Advance);
    assert_eq!(
        status,
        FormStatus::EditingWithError(
            FieldId::From,
            ValidationError::InvalidAddress {
                field: FieldId::From
            }
        )
    );

    let out = plain(&render(c.state(), &Theme::default()));
    assert!(out.ends_with("    invalid email address"));

    // Blocked send leaves everything as it was.
    assert_eq!(c.handle(FormEvent::Send), status);
    drop(c);
    assert!(sender.calls.is_empty());
}

#[test]
fn fixing_the_address_clears_the_error() {
    let mut sender = Recording::default();
    let mut c = FormController::with_state(FormState::default(), &mut sender);
    type_text(&mut c, "oops");
    assert!(matches!(
        c.handle(FormEvent::Advance),
        FormStatus::EditingWithError(FieldId::To, _)
    ));
    c.handle(FormEvent::Edit(EditEvent::DeleteLine));
    type_text(&mut c, "a@b.com");
    assert_eq!(c.handle(FormEvent::Advance), FormStatus::Editing(FieldId::From));
    assert_eq!(c.state().last_error, None);
}

#[test]
fn quit_never_sends() {
    let mut sender = Recording::default();
    let mut c = FormController::new(&mut sender);
    type_text(&mut c, "a@b.com");
    assert_eq!(c.handle(FormEvent::Quit), FormStatus::Quit);
    assert_eq!(c.handle(FormEvent::Send), FormStatus::Quit);
    drop(c);
    assert!(sender.calls.is_empty());
}
