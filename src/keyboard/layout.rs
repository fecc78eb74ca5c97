use serde::{Deserialize, Serialize};

/// Row-major key labels, the source the trainer reads its keys from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

pub const LAYOUT_NAMES: &[&str] = &["qwerty", "dvorak", "colemak"];

fn row(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

impl KeyboardLayout {
    pub fn qwerty() -> Self {
        Self {
            name: "QWERTY".to_string(),
            rows: vec![
                row(&["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "BACKSPACE"]),
                row(&["TAB", "Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "[", "]", "\\"]),
                row(&["CAPSLOCK", "A", "S", "D", "F", "G", "H", "J", "K", "L", ";", "'", "ENTER"]),
                row(&["SHIFT", "Z", "X", "C", "V", "B", "N", "M", ",", ".", "/"]),
            ],
        }
    }

    pub fn dvorak() -> Self {
        Self {
            name: "Dvorak".to_string(),
            rows: vec![
                row(&["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "[", "]", "BACKSPACE"]),
                row(&["TAB", "'", ",", ".", "P", "Y", "F", "G", "C", "R", "L", "/", "=", "\\"]),
                row(&["CAPSLOCK", "A", "O", "E", "U", "I", "D", "H", "T", "N", "S", "-", "ENTER"]),
                row(&["SHIFT", ";", "Q", "J", "K", "X", "B", "M", "W", "V", "Z"]),
            ],
        }
    }

    pub fn colemak() -> Self {
        Self {
            name: "Colemak".to_string(),
            rows: vec![
                row(&["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "=", "BACKSPACE"]),
                row(&["TAB", "Q", "W", "F", "P", "G", "J", "L", "U", "Y", ";", "[", "]", "\\"]),
                row(&["CAPSLOCK", "A", "R", "S", "T", "D", "H", "N", "E", "I", "O", "'", "ENTER"]),
                row(&["SHIFT", "Z", "X", "C", "V", "B", "K", "M", ",", ".", "/"]),
            ],
        }
    }

    pub fn custom(rows: Vec<Vec<String>>) -> Self {
        Self {
            name: "Custom".to_string(),
            rows,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "qwerty" => Some(Self::qwerty()),
            "dvorak" => Some(Self::dvorak()),
            "colemak" => Some(Self::colemak()),
            _ => None,
        }
    }

    pub fn key_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::qwerty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_layouts_share_special_keys() {
        for name in LAYOUT_NAMES {
            let layout = KeyboardLayout::from_name(name).unwrap();
            let all: Vec<&str> = layout.rows.iter().flatten().map(String::as_str).collect();
            assert!(all.contains(&"CAPSLOCK"), "{name} missing CAPSLOCK");
            assert!(all.contains(&"BACKSPACE"), "{name} missing BACKSPACE");
            assert_eq!(layout.rows.len(), 4);
        }
    }

    #[test]
    fn test_builtin_layouts_have_unique_labels() {
        for name in LAYOUT_NAMES {
            let layout = KeyboardLayout::from_name(name).unwrap();
            let mut all: Vec<&String> = layout.rows.iter().flatten().collect();
            let total = all.len();
            all.sort();
            all.dedup();
            assert_eq!(all.len(), total, "{name} has duplicate labels");
            assert_eq!(layout.key_count(), total);
        }
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(KeyboardLayout::from_name("Dvorak").unwrap().name, "Dvorak");
        assert!(KeyboardLayout::from_name("workman").is_none());
    }
}
