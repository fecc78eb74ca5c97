use tracing::warn;

use crate::keyboard::layout::KeyboardLayout;

/// One on-screen key. `id` equals the upper-cased label and is unique
/// within a [`Keyboard`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyElement {
    pub id: String,
    pub label: String,
    pub row: usize,
    pub hit: bool,
}

impl KeyElement {
    pub fn new(label: &str, row: usize) -> Self {
        let label = label.to_uppercase();
        Self {
            id: label.clone(),
            label,
            row,
            hit: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    keys: Vec<KeyElement>,
    row_count: usize,
}

impl Keyboard {
    pub fn from_layout(layout: &KeyboardLayout) -> Self {
        let mut keys: Vec<KeyElement> = Vec::with_capacity(layout.key_count());
        let mut row_count = 0;
        for (row_idx, row) in layout.rows.iter().enumerate() {
            let mut placed = false;
            for label in row {
                let label = label.trim();
                if label.is_empty() {
                    continue;
                }
                let key = KeyElement::new(label, row_count);
                if keys.iter().any(|k| k.id == key.id) {
                    warn!(id = %key.id, row = row_idx, "duplicate key label dropped from layout");
                    continue;
                }
                keys.push(key);
                placed = true;
            }
            if placed {
                row_count += 1;
            }
        }
        Self { keys, row_count }
    }

    pub fn keys(&self) -> &[KeyElement] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn get(&self, idx: usize) -> Option<&KeyElement> {
        self.keys.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut KeyElement> {
        self.keys.get_mut(idx)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.id == id)
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut KeyElement> {
        self.keys.iter_mut().find(|k| k.id == id)
    }

    /// Keys of one visual row, in layout order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, &KeyElement)> {
        self.keys
            .iter()
            .enumerate()
            .filter(move |(_, k)| k.row == row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(rows: &[&[&str]]) -> KeyboardLayout {
        KeyboardLayout::custom(
            rows.iter()
                .map(|r| r.iter().map(|l| l.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_labels_are_uppercased() {
        let kb = Keyboard::from_layout(&layout(&[&["q", "w", "CapsLock"]]));
        let ids: Vec<&str> = kb.keys().iter().map(|k| k.id.as_str()).collect();
        assert_eq!(ids, vec!["Q", "W", "CAPSLOCK"]);
        assert!(kb.keys().iter().all(|k| k.id == k.label));
    }

    #[test]
    fn test_duplicate_ids_are_dropped() {
        let kb = Keyboard::from_layout(&layout(&[&["Q", "W"], &["q", "E"]]));
        assert_eq!(kb.len(), 3);
        assert_eq!(kb.position("E"), Some(2));
        assert_eq!(kb.get(2).unwrap().row, 1);
    }

    #[test]
    fn test_empty_rows_do_not_count() {
        let kb = Keyboard::from_layout(&layout(&[&[], &["  "], &["A"]]));
        assert_eq!(kb.len(), 1);
        assert_eq!(kb.row_count(), 1);
        assert_eq!(kb.get(0).unwrap().row, 0);
    }

    #[test]
    fn test_empty_layout() {
        let kb = Keyboard::from_layout(&layout(&[]));
        assert!(kb.is_empty());
        assert!(kb.keys().is_empty());
        assert_eq!(kb.position("Q"), None);
    }

    #[test]
    fn test_row_iteration() {
        let kb = Keyboard::from_layout(&KeyboardLayout::qwerty());
        let home: Vec<&str> = kb.row(2).map(|(_, k)| k.label.as_str()).take(3).collect();
        assert_eq!(home, vec!["CAPSLOCK", "A", "S"]);
        assert_eq!(kb.row_count(), 4);
    }
}
