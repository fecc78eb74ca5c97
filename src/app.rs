use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::engine::random::RandomError;
use crate::engine::{KeyboardTrainer, KeydownOutcome};
use crate::keyboard::model::Keyboard;
use crate::session::tally::Tally;
use crate::ui::theme::Theme;

pub struct App {
    pub trainer: KeyboardTrainer,
    pub tally: Tally,
    pub theme: Theme,
    pub config: Config,
    pub layout_name: String,
    /// Shown in the header until the next successful target pick.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let theme = Theme::load(&config.theme).unwrap_or_else(|| {
            warn!(theme = %config.theme, "theme not found, using default");
            Theme::default()
        });

        let layout = config.layout();
        let keyboard = Keyboard::from_layout(&layout);
        if keyboard.is_empty() {
            warn!(layout = %layout.name, "keyboard layout has no keys");
        }

        let trainer =
            KeyboardTrainer::with_source_kind(keyboard, config.random_source, config.hit_flash())
                .with_context(|| {
                    format!(
                        "cannot start with random source `{}`",
                        config.random_source.as_str()
                    )
                })?;

        let mut app = Self {
            trainer,
            tally: Tally::new(),
            theme,
            config,
            layout_name: layout.name,
            status: None,
            should_quit: false,
        };
        app.start();
        Ok(app)
    }

    pub fn from_parts(trainer: KeyboardTrainer, config: Config) -> Self {
        let layout_name = config.layout().name;
        let mut app = Self {
            trainer,
            tally: Tally::new(),
            theme: Theme::default(),
            config,
            layout_name,
            status: None,
            should_quit: false,
        };
        app.start();
        app
    }

    fn start(&mut self) {
        match self.trainer.start() {
            Some(id) => info!(target_key = %id, "initial target"),
            None if self.trainer.get_keys().is_empty() => {
                self.status = Some("No keys in this layout".to_string());
            }
            None => {
                self.status = Some("No target: random source unavailable (Ctrl+R to retry)".to_string());
            }
        }
    }

    pub fn press(&mut self, key: &str, now: Instant) {
        match self.trainer.handle_keydown(key, now) {
            Ok(outcome) => {
                if matches!(outcome, KeydownOutcome::Matched { next: Some(_) }) {
                    self.status = None;
                }
                self.tally.record(&outcome, now);
            }
            Err(err) => {
                // The match itself counted; only picking the next target failed.
                self.tally.record(&KeydownOutcome::Matched { next: None }, now);
                self.report_random_error(&err);
            }
        }
    }

    pub fn retarget(&mut self) {
        match self.trainer.retarget() {
            Ok(Some(id)) => {
                info!(target_key = %id, "retargeted");
                self.status = None;
            }
            Ok(None) => {}
            Err(err) => self.report_random_error(&err),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.trainer.tick(now);
    }

    pub fn reset_tally(&mut self) {
        self.tally.reset();
    }

    fn report_random_error(&mut self, err: &RandomError) {
        warn!(error = %err, "target selection failed");
        self.status = Some(format!("No target: {err} (Ctrl+R to retry)"));
    }

    pub fn highlighted_id(&self) -> Option<&str> {
        self.trainer.highlighted().map(|k| k.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::engine::random::testing::{MissingSource, ScriptedSource};
    use crate::keyboard::layout::KeyboardLayout;

    fn app_with(source: Box<dyn crate::engine::random::SecureRandom>) -> App {
        let layout = KeyboardLayout::custom(vec![vec![
            "Q".to_string(),
            "W".to_string(),
            "E".to_string(),
        ]]);
        let trainer = KeyboardTrainer::new(
            Keyboard::from_layout(&layout),
            source,
            Duration::from_millis(150),
        );
        App::from_parts(trainer, Config::default())
    }

    #[test]
    fn test_press_updates_tally() {
        let mut app = app_with(Box::new(ScriptedSource::new(&[0, 1])));
        assert_eq!(app.highlighted_id(), Some("Q"));

        let now = Instant::now();
        app.press("w", now);
        app.press("q", now);

        assert_eq!(app.tally.misses, 1);
        assert_eq!(app.tally.matches, 1);
        assert_eq!(app.highlighted_id(), Some("W"));
        assert!(app.status.is_none());
    }

    #[test]
    fn test_missing_source_degrades_to_status() {
        let mut app = app_with(Box::new(MissingSource));
        assert!(app.highlighted_id().is_none());
        assert!(app.status.as_deref().unwrap().contains("No target"));

        // Presses still flash without a target
        app.press("e", Instant::now());
        assert!(app.trainer.get_keys()[2].hit);
        assert_eq!(app.tally.presses, 1);

        app.retarget();
        assert!(app.highlighted_id().is_none());
    }

    #[test]
    fn test_tick_clears_flash() {
        let mut app = app_with(Box::new(ScriptedSource::new(&[0])));
        let now = Instant::now();
        app.press("e", now);
        app.tick(now + Duration::from_millis(200));
        assert!(!app.trainer.get_keys()[2].hit);
    }
}
