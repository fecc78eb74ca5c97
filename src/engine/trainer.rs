use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::engine::flash::FlashSchedule;
use crate::engine::random::{self, RandomError, RandomSourceKind, SecureRandom};
use crate::keyboard::display::DOUBLE_CLEAR_LABELS;
use crate::keyboard::model::{KeyElement, Keyboard};

/// What a single key press did to the trainer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeydownOutcome {
    /// No key on the keyboard carries this identifier.
    Unmapped,
    /// The key flashed but nothing was highlighted.
    NoTarget,
    /// The key flashed; the highlighted key is a different one.
    Missed { target: String },
    /// The highlighted key was pressed. `next` is the new target, if any.
    Matched { next: Option<String> },
}

pub struct KeyboardTrainer {
    keyboard: Keyboard,
    source: Box<dyn SecureRandom>,
    highlighted: Option<usize>,
    flash: FlashSchedule,
}

impl KeyboardTrainer {
    pub fn new(keyboard: Keyboard, source: Box<dyn SecureRandom>, flash: Duration) -> Self {
        info!(
            keys = keyboard.len(),
            source = source.name(),
            "keyboard trainer ready"
        );
        Self {
            keyboard,
            source,
            highlighted: None,
            flash: FlashSchedule::new(flash),
        }
    }

    /// Build with an OS-backed source. Fails when no secure source exists.
    pub fn with_source_kind(
        keyboard: Keyboard,
        kind: RandomSourceKind,
        flash: Duration,
    ) -> Result<Self, RandomError> {
        let source = random::select_source(kind)?;
        Ok(Self::new(keyboard, source, flash))
    }

    pub fn get_keys(&self) -> &[KeyElement] {
        self.keyboard.keys()
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Secure integer in `[ceil(min), floor(max)]`.
    pub fn get_random_number(&mut self, min: f64, max: f64) -> Result<i64, RandomError> {
        let (lo, hi) = random::normalize_bounds(min, max)?;
        self.source.random_int(lo, hi)
    }

    fn random_index(&mut self) -> Result<Option<usize>, RandomError> {
        let count = self.keyboard.len();
        if count == 0 {
            return Ok(None);
        }
        let idx = self.get_random_number(0.0, (count - 1) as f64)?;
        Ok(Some(idx as usize))
    }

    pub fn get_random_key(&mut self) -> Result<Option<&KeyElement>, RandomError> {
        let idx = self.random_index()?;
        Ok(idx.and_then(|i| self.keyboard.get(i)))
    }

    /// Highlight a random key. Does not clear an earlier highlight on its
    /// own; the single highlight slot is simply overwritten.
    pub fn target_random_key(&mut self) -> Result<Option<&KeyElement>, RandomError> {
        let Some(idx) = self.random_index()? else {
            return Ok(None);
        };
        self.highlighted = Some(idx);
        let key = self.keyboard.get(idx);
        if let Some(k) = key {
            debug!(target_key = %k.id, "new target");
        }
        Ok(key)
    }

    pub fn highlighted(&self) -> Option<&KeyElement> {
        self.highlighted.and_then(|i| self.keyboard.get(i))
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.highlighted().is_some_and(|k| k.id == id)
    }

    /// Initial target at startup. Source failures are logged, not fatal.
    pub fn start(&mut self) -> Option<String> {
        match self.target_random_key() {
            Ok(key) => key.map(|k| k.id.clone()),
            Err(err) => {
                warn!(error = %err, "initial target selection skipped");
                None
            }
        }
    }

    /// Drop the current target and pick a fresh one.
    pub fn retarget(&mut self) -> Result<Option<String>, RandomError> {
        self.highlighted = None;
        Ok(self.target_random_key()?.map(|k| k.id.clone()))
    }

    fn clear_highlight_on(&mut self, idx: usize) {
        if self.highlighted == Some(idx) {
            self.highlighted = None;
        }
    }

    pub fn handle_keydown(
        &mut self,
        key: &str,
        now: Instant,
    ) -> Result<KeydownOutcome, RandomError> {
        let pressed = key.to_uppercase();

        let Some(pressed_idx) = self.keyboard.position(&pressed) else {
            return Ok(KeydownOutcome::Unmapped);
        };

        if let Some(el) = self.keyboard.get_mut(pressed_idx) {
            el.hit = true;
        }
        self.flash.schedule(&pressed, now);

        let Some(target_idx) = self.highlighted else {
            return Ok(KeydownOutcome::NoTarget);
        };
        let target_label = match self.keyboard.get(target_idx) {
            Some(k) => k.label.clone(),
            None => return Ok(KeydownOutcome::NoTarget),
        };

        if pressed != target_label {
            return Ok(KeydownOutcome::Missed {
                target: target_label,
            });
        }

        self.clear_highlight_on(target_idx);
        if DOUBLE_CLEAR_LABELS.contains(&pressed.as_str()) {
            self.clear_highlight_on(pressed_idx);
        }

        let next = self.target_random_key()?.map(|k| k.id.clone());
        Ok(KeydownOutcome::Matched { next })
    }

    /// Clear `hit` on keys whose flash has run out.
    pub fn tick(&mut self, now: Instant) {
        for id in self.flash.expire(now) {
            if let Some(el) = self.keyboard.find_mut(&id) {
                el.hit = false;
            }
        }
    }

    pub fn flash_duration(&self) -> Duration {
        self.flash.duration()
    }
}
