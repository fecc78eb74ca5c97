#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerAssignment {
    pub hand: Hand,
    pub finger: Finger,
}

impl FingerAssignment {
    pub fn new(hand: Hand, finger: Finger) -> Self {
        Self { hand, finger }
    }
}

/// Touch-typing finger for the key in column `col` of a row, counting the
/// leading wide key (Tab, Caps Lock, Shift) or backtick as column 0.
pub fn finger_for_column(col: usize) -> FingerAssignment {
    use Finger::*;
    use Hand::*;

    match col {
        0 | 1 => FingerAssignment::new(Left, Pinky),
        2 => FingerAssignment::new(Left, Ring),
        3 => FingerAssignment::new(Left, Middle),
        4 | 5 => FingerAssignment::new(Left, Index),
        6 | 7 => FingerAssignment::new(Right, Index),
        8 => FingerAssignment::new(Right, Middle),
        9 => FingerAssignment::new(Right, Ring),
        _ => FingerAssignment::new(Right, Pinky),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_row_fingers() {
        // CAPSLOCK A S D F G H J K L
        assert_eq!(finger_for_column(0).finger, Finger::Pinky);
        assert_eq!(finger_for_column(1), FingerAssignment::new(Hand::Left, Finger::Pinky));
        assert_eq!(finger_for_column(4), FingerAssignment::new(Hand::Left, Finger::Index));
        assert_eq!(finger_for_column(7), FingerAssignment::new(Hand::Right, Finger::Index));
        assert_eq!(finger_for_column(12).hand, Hand::Right);
    }
}
