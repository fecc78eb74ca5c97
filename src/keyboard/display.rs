//! Key identifier adapter between terminal key codes and key labels.
//!
//! Input arrives as crossterm `KeyCode`s; the trainer speaks browser-style
//! key identifiers (`"q"`, `"Backspace"`, `"CapsLock"`). Conversion happens
//! here and nowhere else.
use crossterm::event::{KeyCode, ModifierKeyCode};

pub const BACKSPACE: &str = "BACKSPACE";
pub const CAPSLOCK: &str = "CAPSLOCK";

/// Labels that also get their own highlight cleared on a matching press.
pub const DOUBLE_CLEAR_LABELS: &[&str] = &[CAPSLOCK, BACKSPACE];

/// Browser-style identifier for a terminal key code, `None` for keys the
/// trainer never sees (arrows, function keys, media keys).
pub fn key_identifier(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Char(ch) => return Some(ch.to_string()),
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::Delete => "Delete",
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift",
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control",
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt",
            _ => return None,
        },
        _ => return None,
    };
    Some(name.to_string())
}

/// Short label for multi-character keys in the diagram. Returns `""` when
/// the label should be drawn as is.
pub fn key_short_label(label: &str) -> &'static str {
    match label {
        BACKSPACE => "Bksp",
        CAPSLOCK => "Caps",
        "ENTER" => "Ent",
        "SHIFT" => "Shft",
        "TAB" => "Tab",
        "CONTROL" => "Ctrl",
        _ => "",
    }
}

/// Text drawn inside a key cap.
pub fn key_cap_text(label: &str, compact: bool) -> String {
    let short = key_short_label(label);
    if !short.is_empty() && (compact || label.chars().count() > 6) {
        short.to_string()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_identifiers_keep_case() {
        assert_eq!(key_identifier(KeyCode::Char('q')), Some("q".to_string()));
        assert_eq!(key_identifier(KeyCode::Char('Q')), Some("Q".to_string()));
        assert_eq!(key_identifier(KeyCode::Char(';')), Some(";".to_string()));
    }

    #[test]
    fn test_named_identifiers_uppercase_to_labels() {
        assert_eq!(key_identifier(KeyCode::Backspace).unwrap().to_uppercase(), BACKSPACE);
        assert_eq!(key_identifier(KeyCode::CapsLock).unwrap().to_uppercase(), CAPSLOCK);
        assert_eq!(key_identifier(KeyCode::Enter).unwrap().to_uppercase(), "ENTER");
        assert_eq!(
            key_identifier(KeyCode::Modifier(ModifierKeyCode::RightShift)),
            Some("Shift".to_string())
        );
    }

    #[test]
    fn test_unmapped_codes() {
        assert_eq!(key_identifier(KeyCode::Up), None);
        assert_eq!(key_identifier(KeyCode::F(5)), None);
    }

    #[test]
    fn test_key_cap_text() {
        assert_eq!(key_cap_text("Q", false), "Q");
        assert_eq!(key_cap_text("BACKSPACE", false), "Bksp");
        assert_eq!(key_cap_text("BACKSPACE", true), "Bksp");
        assert_eq!(key_cap_text("ENTER", false), "ENTER");
        assert_eq!(key_cap_text("ENTER", true), "Ent");
    }
}
