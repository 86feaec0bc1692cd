use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::api::types::Word;
use crate::ui::theme::Theme;

/// Stateless card for the current word. Optional fields are omitted
/// entirely rather than rendered as empty placeholders.
pub struct WordCard<'a> {
    pub word: &'a Word,
    pub theme: &'a Theme,
}

impl<'a> WordCard<'a> {
    pub fn new(word: &'a Word, theme: &'a Theme) -> Self {
        Self { word, theme }
    }

    /// Lines rendered inside the card, in order. Split out so tests can
    /// check the conditional fields without a terminal buffer.
    fn lines(&self) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = vec![Line::from(vec![
            Span::styled(
                self.word.word.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  [{}]", self.word.difficulty_level),
                Style::default().fg(colors.text_dim()),
            ),
        ])];

        if let Some(ref pronunciation) = self.word.pronunciation {
            lines.push(Line::from(Span::styled(
                pronunciation.as_str(),
                Style::default().fg(colors.text_dim()),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.word.definition.as_str(),
            Style::default().fg(colors.fg()),
        )));

        if let Some(ref example) = self.word.example_sentence {
            lines.push(Line::from(vec![
                Span::styled("Example: ", Style::default().fg(colors.text_dim())),
                Span::styled(
                    example.as_str(),
                    Style::default()
                        .fg(colors.text_dim())
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }

        lines
    }
}

impl Widget for WordCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Word ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
