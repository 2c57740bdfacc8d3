//! Raw key events to form events.
//!
//! Bindings (fixed):
//! - Enter / Tab / Ctrl+N : advance
//! - Shift+Tab            : retreat
//! - Ctrl+S               : send
//! - Ctrl+C / Esc         : quit
//! - Ctrl+Z               : suspend the process
//! - everything else      : edit the focused field (readline-ish)

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::form::{EditEvent, FormEvent};

/// What a key resolves to: either a form event or an app-level command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Form(FormEvent),
    Suspend,
}

pub fn binding_for_key(key: KeyEvent) -> Option<Binding> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let word = ctrl || key.modifiers.contains(KeyModifiers::ALT);

    let form = |e: FormEvent| Some(Binding::Form(e));
    let edit = |e: EditEvent| Some(Binding::Form(FormEvent::Edit(e)));

    match key.code {
        KeyCode::Enter | KeyCode::Tab => form(FormEvent::Advance),
        KeyCode::BackTab => form(FormEvent::Retreat),
        KeyCode::Esc => form(FormEvent::Quit),
        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => form(FormEvent::Quit),
            's' => form(FormEvent::Send),
            'n' => form(FormEvent::Advance),
            'z' => Some(Binding::Suspend),
            'a' => edit(EditEvent::CursorHome),
            'e' => edit(EditEvent::CursorEnd),
            'b' => edit(EditEvent::CursorLeft),
            'f' => edit(EditEvent::CursorRight),
            'w' => edit(EditEvent::DeletePrevWord),
            'k' => edit(EditEvent::DeleteTillEnd),
            'u' => edit(EditEvent::DeleteLine),
            _ => None,
        },
        KeyCode::Char(c) => edit(EditEvent::Insert(c)),
        KeyCode::Backspace if word => edit(EditEvent::DeletePrevWord),
        KeyCode::Backspace => edit(EditEvent::DeletePrev),
        KeyCode::Delete => edit(EditEvent::DeleteNext),
        KeyCode::Left if word => edit(EditEvent::WordLeft),
        KeyCode::Right if word => edit(EditEvent::WordRight),
        KeyCode::Left => edit(EditEvent::CursorLeft),
        KeyCode::Right => edit(EditEvent::CursorRight),
        KeyCode::Home => edit(EditEvent::CursorHome),
        KeyCode::End => edit(EditEvent::CursorEnd),
        _ => None,
    }
}

/// Human readable chord, e.g. `ctrl-s`, used in debug logs.
pub fn chord_from_key(key: KeyEvent) -> String {
    let code = match key.code {
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::F(n) => format!("f{n}"),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_ascii_lowercase().to_string(),
        other => format!("{other:?}").to_ascii_lowercase(),
    };
    let m = key.modifiers;
    let mut parts: Vec<&str> = Vec::new();
    if m.contains(KeyModifiers::CONTROL) {
        parts.push("ctrl");
    }
    if m.contains(KeyModifiers::ALT) {
        parts.push("alt");
    }
    if m.contains(KeyModifiers::SHIFT) {
        parts.push("shift");
    }
    parts.push(&code);
    parts.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn control_keys() {
        let advance = Some(Binding::Form(FormEvent::Advance));
        assert_eq!(binding_for_key(key(KeyCode::Enter)), advance);
        assert_eq!(binding_for_key(key(KeyCode::Tab)), advance);
        assert_eq!(binding_for_key(ctrl('n')), advance);
        assert_eq!(
            binding_for_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Binding::Form(FormEvent::Retreat))
        );
        assert_eq!(binding_for_key(ctrl('s')), Some(Binding::Form(FormEvent::Send)));
        assert_eq!(binding_for_key(ctrl('c')), Some(Binding::Form(FormEvent::Quit)));
        assert_eq!(binding_for_key(key(KeyCode::Esc)), Some(Binding::Form(FormEvent::Quit)));
        assert_eq!(binding_for_key(ctrl('z')), Some(Binding::Suspend));
    }

    #[test]
    fn plain_chars_insert() {
        assert_eq!(
            binding_for_key(key(KeyCode::Char('x'))),
            Some(Binding::Form(FormEvent::Edit(EditEvent::Insert('x'))))
        );
        assert_eq!(
            binding_for_key(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            Some(Binding::Form(FormEvent::Edit(EditEvent::Insert('X'))))
        );
    }

    #[test]
    fn word_motions_with_modifiers() {
        assert_eq!(
            binding_for_key(KeyEvent::new(KeyCode::Left, KeyModifiers::CONTROL)),
            Some(Binding::Form(FormEvent::Edit(EditEvent::WordLeft)))
        );
        assert_eq!(
            binding_for_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::ALT)),
            Some(Binding::Form(FormEvent::Edit(EditEvent::DeletePrevWord)))
        );
        assert_eq!(
            binding_for_key(key(KeyCode::Backspace)),
            Some(Binding::Form(FormEvent::Edit(EditEvent::DeletePrev)))
        );
    }

    #[test]
    fn releases_and_unbound_keys_are_ignored() {
        let mut release = key(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        assert_eq!(binding_for_key(release), None);
        assert_eq!(binding_for_key(key(KeyCode::F(5))), None);
        assert_eq!(binding_for_key(ctrl('q')), None);
    }

    #[test]
    fn chords_read_naturally() {
        assert_eq!(chord_from_key(ctrl('s')), "ctrl-s");
        assert_eq!(
            chord_from_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            "shift-backtab"
        );
        assert_eq!(chord_from_key(key(KeyCode::Char(' '))), "space");
    }
}
