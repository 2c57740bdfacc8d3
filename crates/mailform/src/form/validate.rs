//! Address validation for the To and From fields.
//!
//! Subject and Body carry no validator; only the address fields are checked,
//! and each one independently.

use std::str::FromStr;

use lettre::message::Mailbox;
use thiserror::Error;

use super::field::FieldId;

/// Why a field's content failed its semantic check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid email address")]
    InvalidAddress { field: FieldId },
}

impl ValidationError {
    /// The field whose content was rejected.
    pub fn field(&self) -> FieldId {
        match self {
            ValidationError::InvalidAddress { field } => *field,
        }
    }
}

/// Validator stored on a [`Field`](super::field::Field).
pub type Validator = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// Accepts exactly one RFC 5322 mailbox, either `user@host` or
/// `Display Name <user@host>`, optionally followed by `(comments)`. The
/// empty string is rejected.
pub fn validate_address(field: FieldId, text: &str) -> Result<(), ValidationError> {
    let text = strip_trailing_comments(text.trim());
    if text.is_empty() {
        return Err(ValidationError::InvalidAddress { field });
    }
    Mailbox::from_str(text)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidAddress { field })
}

/// Drops `(comment)` groups, nested ones included, from the end of an
/// address. The mailbox parser does not understand them.
fn strip_trailing_comments(mut text: &str) -> &str {
    while text.ends_with(')') {
        let mut depth = 0usize;
        let mut open = None;
        for (i, c) in text.char_indices().rev() {
            match c {
                ')' => depth += 1,
                '(' => {
                    depth -= 1;
                    if depth == 0 {
                        open = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        match open {
            Some(i) => text = text[..i].trim_end(),
            None => break,
        }
    }
    text
}

/// Boxed validator bound to `field`, ready to attach to a field definition.
pub fn address_validator(field: FieldId) -> Validator {
    Box::new(move |text| validate_address(field, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_invalid() {
        assert_eq!(
            validate_address(FieldId::To, ""),
            Err(ValidationError::InvalidAddress { field: FieldId::To })
        );
        assert!(validate_address(FieldId::To, "   ").is_err());
    }

    #[test]
    fn plain_address_is_valid() {
        assert_eq!(validate_address(FieldId::To, "john@example.com"), Ok(()));
        assert_eq!(validate_address(FieldId::From, "a@b.com"), Ok(()));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(
            validate_address(FieldId::From, "not-an-address"),
            Err(ValidationError::InvalidAddress {
                field: FieldId::From
            })
        );
    }

    #[test]
    fn named_mailbox_is_valid() {
        assert!(validate_address(FieldId::To, "John Doe <john@example.com>").is_ok());
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert!(validate_address(FieldId::To, "  john@example.com ").is_ok());
    }

    #[test]
    fn trailing_comments_are_allowed() {
        assert!(validate_address(FieldId::To, "john@example.com (c)").is_ok());
        assert!(validate_address(FieldId::To, "John <john@example.com> (work) (x (y))").is_ok());
        assert_eq!(strip_trailing_comments("a@b.com (x (y))"), "a@b.com");
    }

    #[test]
    fn comments_alone_or_unbalanced_are_invalid() {
        assert!(validate_address(FieldId::To, "(just a comment)").is_err());
        assert!(validate_address(FieldId::To, "a@b.com (open").is_err());
        assert!(validate_address(FieldId::To, "a@b.com)").is_err());
    }

    #[test]
    fn boxed_validator_reports_its_field() {
        let v = address_validator(FieldId::From);
        assert_eq!(v("nope").unwrap_err().field(), FieldId::From);
        assert!(v("x@y.org").is_ok());
    }

    #[test]
    fn message_matches_footer_text() {
        let err = ValidationError::InvalidAddress { field: FieldId::To };
        assert_eq!(err.to_string(), "invalid email address");
    }
}
