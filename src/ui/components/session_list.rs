use chrono::{DateTime, Local, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::api::types::SessionSummary;
use crate::ui::components::result_card::score_color;
use crate::ui::theme::Theme;

/// Recent practice sessions. Callers skip this widget entirely when the
/// list is empty.
pub struct SessionList<'a> {
    pub sessions: &'a [SessionSummary],
    pub theme: &'a Theme,
}

impl<'a> SessionList<'a> {
    pub fn new(sessions: &'a [SessionSummary], theme: &'a Theme) -> Self {
        Self { sessions, theme }
    }
}

/// Deterministic local-time format; the timestamp arrives in UTC.
pub fn format_practiced_at(practiced_at: DateTime<Utc>) -> String {
    practiced_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

impl Widget for SessionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Recent Practice ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::with_capacity(self.sessions.len() * 2);
        for session in self.sessions {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}/10", session.score),
                    Style::default()
                        .fg(score_color(session.score))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", session.user_sentence),
                    Style::default().fg(colors.fg()),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("      {}", format_practiced_at(session.practiced_at)),
                Style::default().fg(colors.text_dim()),
            )));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn practiced_at_formats_to_minute_precision() {
        let ts = DateTime::parse_from_rfc3339("2025-06-01T12:30:45Z")
            .unwrap()
            .with_timezone(&Utc);
        let formatted = format_practiced_at(ts);

        // "YYYY-MM-DD HH:MM" in whatever zone the host runs in.
        assert_eq!(formatted.len(), 16);
        let bytes = formatted.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert_eq!(bytes[10], b' ');
        assert_eq!(bytes[13], b':');
    }
}
