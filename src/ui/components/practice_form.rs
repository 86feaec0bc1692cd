use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::sentence_input::SentenceInput;
use crate::ui::theme::Theme;

/// The sentence entry form. Editing is owned by [`SentenceInput`]; this
/// widget only draws it, locked (dimmed, no cursor) while a request is in
/// flight.
pub struct PracticeForm<'a> {
    pub input: &'a SentenceInput,
    pub locked: bool,
    pub theme: &'a Theme,
}

impl<'a> PracticeForm<'a> {
    pub fn new(input: &'a SentenceInput, locked: bool, theme: &'a Theme) -> Self {
        Self {
            input,
            locked,
            theme,
        }
    }
}

impl Widget for PracticeForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let title = if self.locked {
            " Your sentence (waiting for backend...) "
        } else {
            " Your sentence "
        };
        let border = if self.locked {
            colors.border()
        } else {
            colors.border_focused()
        };
        let block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.locked {
            Line::from(Span::styled(
                self.input.value().to_string(),
                Style::default().fg(colors.text_dim()),
            ))
        } else if self.input.value().is_empty() {
            Line::from(vec![
                Span::styled(
                    " ",
                    Style::default()
                        .bg(colors.text_cursor_bg())
                        .fg(colors.text_cursor_fg()),
                ),
                Span::styled(
                    "Type a sentence using the word above, then press Enter",
                    Style::default().fg(colors.text_dim()),
                ),
            ])
        } else {
            let (before, cursor_char, after) = self.input.render_parts();
            let cursor_text = cursor_char.map(String::from).unwrap_or_else(|| " ".into());
            Line::from(vec![
                Span::styled(before.to_string(), Style::default().fg(colors.fg())),
                Span::styled(
                    cursor_text,
                    Style::default()
                        .bg(colors.text_cursor_bg())
                        .fg(colors.text_cursor_fg()),
                ),
                Span::styled(after.to_string(), Style::default().fg(colors.fg())),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}
