use std::time::Instant;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::tally::Tally;
use crate::ui::theme::Theme;

pub struct TallyPanel<'a> {
    tally: &'a Tally,
    target: Option<&'a str>,
    now: Instant,
    theme: &'a Theme,
}

impl<'a> TallyPanel<'a> {
    pub fn new(tally: &'a Tally, target: Option<&'a str>, now: Instant, theme: &'a Theme) -> Self {
        Self {
            tally,
            target,
            now,
            theme,
        }
    }
}

impl Widget for TallyPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let accuracy = self.tally.accuracy();

        let label = |text: &'static str| Span::styled(text, Style::default().fg(colors.fg()));

        let lines = vec![
            Line::from(vec![
                label("Target:   "),
                Span::styled(
                    self.target.unwrap_or("-").to_string(),
                    Style::default().fg(colors.target_bg()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Hits:     "),
                Span::styled(self.tally.matches.to_string(), Style::default().fg(colors.success())),
            ]),
            Line::from(vec![
                label("Misses:   "),
                Span::styled(self.tally.misses.to_string(), Style::default().fg(colors.error())),
            ]),
            Line::from(vec![
                label("Accuracy: "),
                Span::styled(
                    format!("{accuracy:.1}%"),
                    Style::default().fg(if accuracy >= 95.0 {
                        colors.success()
                    } else if accuracy >= 85.0 {
                        colors.warning()
                    } else {
                        colors.error()
                    }),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                label("Streak:   "),
                Span::styled(self.tally.streak.to_string(), Style::default().fg(colors.accent())),
            ]),
            Line::from(vec![
                label("Best:     "),
                Span::styled(
                    self.tally.best_streak.to_string(),
                    Style::default().fg(colors.accent()),
                ),
            ]),
            Line::from(vec![
                label("Per min:  "),
                Span::styled(
                    format!("{:.0}", self.tally.targets_per_minute(self.now)),
                    Style::default().fg(colors.fg()),
                ),
            ]),
        ];

        let block = Block::bordered()
            .title(" Session ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
