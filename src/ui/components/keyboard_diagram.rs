use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::keyboard::display::key_cap_text;
use crate::keyboard::finger::{self, Finger};
use crate::keyboard::model::{KeyElement, Keyboard};
use crate::ui::theme::Theme;

pub struct KeyboardDiagram<'a> {
    pub keyboard: &'a Keyboard,
    pub highlighted: Option<&'a str>,
    pub layout_name: &'a str,
    pub theme: &'a Theme,
    pub compact: bool,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(
        keyboard: &'a Keyboard,
        highlighted: Option<&'a str>,
        layout_name: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            keyboard,
            highlighted,
            layout_name,
            theme,
            compact: false,
        }
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    fn key_style(&self, key: &KeyElement, col: usize) -> Style {
        let colors = &self.theme.colors;
        let is_target = self.highlighted == Some(key.id.as_str());

        // The flash wins while it lasts; the target stays bold underneath it.
        if key.hit {
            let style = Style::default().fg(colors.hit_fg()).bg(colors.hit_bg());
            if is_target {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            }
        } else if is_target {
            Style::default()
                .fg(colors.target_fg())
                .bg(colors.target_bg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(finger_tint(col).unwrap_or(colors.key_fg()))
                .bg(colors.key_bg())
        }
    }
}

fn finger_tint(col: usize) -> Option<Color> {
    let assignment = finger::finger_for_column(col);
    match assignment.finger {
        Finger::Index => None,
        Finger::Middle => Some(Color::Rgb(150, 190, 120)),
        Finger::Ring => Some(Color::Rgb(200, 160, 100)),
        Finger::Pinky => Some(Color::Rgb(200, 120, 120)),
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Keyboard ({}) ", self.layout_name))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = self.keyboard.row_count() as u16;
        if inner.height == 0 || inner.width < 10 || rows == 0 {
            return;
        }

        let spaced = inner.height >= rows * 2 - 1;
        let line_step: u16 = if spaced { 2 } else { 1 };
        let used_height = (rows - 1) * line_step + 1;
        let top = inner.y + inner.height.saturating_sub(used_height) / 2;
        let pad = if self.compact { 0 } else { 1 };

        for row_idx in 0..self.keyboard.row_count() {
            let y = top + row_idx as u16 * line_step;
            if y >= inner.y + inner.height {
                break;
            }

            let mut x = inner.x + 1 + row_idx as u16;
            for (col_idx, (_, key)) in self.keyboard.row(row_idx).enumerate() {
                let cap = key_cap_text(&key.label, self.compact);
                let text = format!("{:pad$}{cap}{:pad$}", "", "", pad = pad);
                let width = text.chars().count() as u16;
                if x + width > inner.x + inner.width {
                    break;
                }
                buf.set_string(x, y, &text, self.key_style(key, col_idx));
                x += width + 1;
            }
        }
    }
}
