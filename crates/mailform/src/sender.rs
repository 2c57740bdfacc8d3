//! The send side of the form.
//!
//! The form core never transmits anything itself. On a successful send it
//! hands the four field contents to a [`MessageSender`], once.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// The composed message, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Message {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub body: String,
}

impl Message {
    /// Header block plus body, the way it is printed after the UI closes.
    pub fn to_text(&self) -> String {
        format!(
            "To: {}\nFrom: {}\nSubject: {}\n\n{}\n",
            self.to, self.from, self.subject, self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Capability that actually transmits a composed message.
pub trait MessageSender {
    fn send(&mut self, message: &Message) -> Result<(), SendError>;
}

impl<T: MessageSender + ?Sized> MessageSender for &mut T {
    fn send(&mut self, message: &Message) -> Result<(), SendError> {
        (**self).send(message)
    }
}

impl<T: MessageSender + ?Sized> MessageSender for Box<T> {
    fn send(&mut self, message: &Message) -> Result<(), SendError> {
        (**self).send(message)
    }
}

/// Default sender: keeps what was sent so the binary can emit it once the
/// terminal is restored.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Vec<Message>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> &[Message] {
        &self.sent
    }

    pub fn take(&mut self) -> Option<Message> {
        self.sent.pop()
    }
}

impl MessageSender for Outbox {
    fn send(&mut self, message: &Message) -> Result<(), SendError> {
        info!(to = %message.to, from = %message.from, "Sending message...");
        self.sent.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn message() -> Message {
        Message {
            to: "a@b.com".into(),
            from: "c@d.com".into(),
            subject: "Hi".into(),
            body: "See you".into(),
        }
    }

    #[test]
    fn outbox_keeps_sent_messages() {
        let mut outbox = Outbox::new();
        outbox.send(&message()).unwrap();
        assert_eq!(outbox.sent(), &[message()]);
        assert_eq!(outbox.take(), Some(message()));
        assert!(outbox.sent().is_empty());
    }

    #[test]
    fn senders_work_through_references_and_boxes() {
        fn deliver<S: MessageSender>(mut sender: S) -> Result<(), SendError> {
            sender.send(&message())
        }
        let mut outbox = Outbox::new();
        deliver(&mut outbox).unwrap();
        let boxed: Box<dyn MessageSender> = Box::new(Outbox::new());
        assert!(deliver(boxed).is_ok());
        assert_eq!(outbox.sent().len(), 1);
    }

    #[test]
    fn text_rendering_has_headers_then_body() {
        assert_eq!(
            message().to_text(),
            "To: a@b.com\nFrom: c@d.com\nSubject: Hi\n\nSee you\n"
        );
    }

    #[test]
    fn json_keeps_field_order() {
        let json = serde_json::to_string(&message()).unwrap();
        assert_eq!(
            json,
            r#"{"to":"a@b.com","from":"c@d.com","subject":"Hi","body":"See you"}"#
        );
    }
}
