use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::api::types::{PracticeResult, Score};
use crate::ui::theme::Theme;

// Score tiers keep their fixed palette across themes.
pub const SCORE_HIGH: Color = Color::Rgb(0x10, 0xb9, 0x81);
pub const SCORE_MEDIUM: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
pub const SCORE_LOW: Color = Color::Rgb(0xef, 0x44, 0x44);

pub fn score_color(score: Score) -> Color {
    if score.value() >= 8 {
        SCORE_HIGH
    } else if score.value() >= 6 {
        SCORE_MEDIUM
    } else {
        SCORE_LOW
    }
}

/// Stateless card for a scored submission.
pub struct ResultCard<'a> {
    pub result: &'a PracticeResult,
    pub theme: &'a Theme,
}

impl<'a> ResultCard<'a> {
    pub fn new(result: &'a PracticeResult, theme: &'a Theme) -> Self {
        Self { result, theme }
    }
}

impl Widget for ResultCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Result ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(colors.fg())),
                Span::styled(
                    format!("{}/10", self.result.score),
                    Style::default()
                        .fg(score_color(self.result.score))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   Level: {}", self.result.cefr_level),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.result.feedback.as_str(),
                Style::default().fg(colors.fg()),
            )),
        ];

        if let Some(ref corrected) = self.result.corrected_sentence {
            lines.push(Line::from(vec![
                Span::styled(
                    "Suggestion: ",
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(corrected.as_str(), Style::default().fg(colors.fg())),
            ]));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(value: u8) -> Score {
        Score::new(value).unwrap()
    }

    #[test]
    fn high_scores_are_green() {
        assert_eq!(score_color(score(8)), SCORE_HIGH);
        assert_eq!(score_color(score(10)), SCORE_HIGH);
        assert_eq!(SCORE_HIGH, Color::Rgb(0x10, 0xb9, 0x81));
    }

    #[test]
    fn medium_scores_are_amber() {
        assert_eq!(score_color(score(6)), SCORE_MEDIUM);
        assert_eq!(score_color(score(7)), SCORE_MEDIUM);
        assert_eq!(SCORE_MEDIUM, Color::Rgb(0xf5, 0x9e, 0x0b));
    }

    #[test]
    fn low_scores_are_red() {
        assert_eq!(score_color(score(0)), SCORE_LOW);
        assert_eq!(score_color(score(5)), SCORE_LOW);
        assert_eq!(SCORE_LOW, Color::Rgb(0xef, 0x44, 0x44));
    }
}
