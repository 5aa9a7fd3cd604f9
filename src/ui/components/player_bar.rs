use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::model::{Song, fmt_mmss};
use crate::ui::components::{gauge::ProgressGauge, spinner::Spinner};
use crate::ui::theme::Theme;

/// Bottom player bar: now-playing summary and volume on the first inner
/// row, the seek gauge on the second, transport hints or a diagnostic on
/// the third.
pub struct PlayerBar<'a> {
    pub song: Option<&'a Song>,
    pub is_playing: bool,
    pub is_loading: bool,
    pub position_ms: u64,
    pub total_ms: u64,
    pub volume: u8,
    pub is_muted: bool,
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for PlayerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.muted));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 3 || inner.width < 4 {
            return;
        }

        let summary_row = inner.y;
        let gauge_row = inner.y + 1;
        let hint_row = inner.y + 2;

        // Now playing, or a nudge to pick something.
        let summary = match self.song {
            Some(song) => {
                let icon = if self.is_playing { "▶ " } else { "⏸ " };
                Line::from(vec![
                    Span::styled(icon, Style::default().fg(theme.primary)),
                    Span::styled(
                        song.title.clone(),
                        Style::default()
                            .fg(theme.foreground)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(song.artist.clone(), Style::default().fg(theme.muted)),
                ])
            }
            None => Line::from(Span::styled(
                "Nothing playing",
                Style::default().fg(theme.muted),
            )),
        };

        let volume = if self.is_muted {
            "vol muted".to_string()
        } else {
            format!("vol {:>3}%", self.volume)
        };
        let volume_width = volume.width() as u16;
        buf.set_line(
            inner.x + 1,
            summary_row,
            &summary,
            inner.width.saturating_sub(volume_width + 3),
        );
        buf.set_string(
            inner.right().saturating_sub(volume_width + 1),
            summary_row,
            volume,
            Style::default().fg(theme.muted),
        );

        // Seek gauge. The scrubber hit-area in the layout module matches
        // this row exactly.
        let ratio = if self.song.is_some() && self.total_ms > 0 {
            self.position_ms as f64 / self.total_ms as f64
        } else {
            0.0
        };
        let label = format!(
            "{} / {}",
            fmt_mmss(self.position_ms / 1000),
            fmt_mmss(self.total_ms / 1000)
        );
        let filled = if self.song.is_some() {
            theme.primary
        } else {
            theme.muted
        };
        ProgressGauge::default()
            .ratio(ratio)
            .label(Span::styled(label, Style::default().fg(theme.foreground)))
            .filled_style(Style::default().fg(filled))
            .empty_style(Style::default().bg(theme.highlight))
            .render(Rect::new(inner.x, gauge_row, inner.width, 1), buf);

        // Diagnostics take over the hint row while present.
        if let Some(status) = self.status {
            buf.set_string(
                inner.x + 1,
                hint_row,
                status,
                Style::default().fg(theme.error),
            );
        } else if self.is_loading {
            Spinner::new()
                .with_label("loading")
                .with_style(Style::default().fg(theme.secondary))
                .render(Rect::new(inner.x + 1, hint_row, 12, 1), buf);
        } else {
            let hints = "p prev   space play/pause   n next   ←/→ seek";
            buf.set_string(
                inner.x + 1,
                hint_row,
                hints,
                Style::default().fg(theme.muted),
            );
        }
    }
}
