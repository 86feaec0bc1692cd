use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::api::types::DashboardStats;
use crate::ui::theme::Theme;

/// Aggregate statistics block. Renders zero-valued defaults when the
/// snapshot is missing (e.g. the fetch failed) or fields are absent.
pub struct StatsPanel<'a> {
    pub stats: Option<&'a DashboardStats>,
    pub theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: Option<&'a DashboardStats>, theme: &'a Theme) -> Self {
        Self { stats, theme }
    }
}

/// Integral averages print without a decimal ("7/10"), fractional ones with
/// one ("7.5/10").
pub fn format_average(average: f64) -> String {
    if average.fract() == 0.0 {
        format!("{average:.0}")
    } else {
        format!("{average:.1}")
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Statistics ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let total = self.stats.map_or(0, |s| s.total_sessions);
        let average = self.stats.map_or(0.0, |s| s.average_score);
        let level = self
            .stats
            .and_then(|s| s.most_common_level)
            .map_or_else(|| "N/A".to_string(), |l| l.to_string());

        let label = Style::default().fg(colors.text_dim());
        let value = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled("Total Sessions:    ", label),
                Span::styled(total.to_string(), value),
            ]),
            Line::from(vec![
                Span::styled("Average Score:     ", label),
                Span::styled(format!("{}/10", format_average(average)), value),
            ]),
            Line::from(vec![
                Span::styled("Most Common Level: ", label),
                Span::styled(level, value),
            ]),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_averages_have_no_decimal() {
        assert_eq!(format_average(0.0), "0");
        assert_eq!(format_average(7.0), "7");
        assert_eq!(format_average(10.0), "10");
    }

    #[test]
    fn fractional_averages_keep_one_decimal() {
        assert_eq!(format_average(7.5), "7.5");
        assert_eq!(format_average(6.25), "6.2");
    }
}
