use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::model::{Song, fmt_mmss};
use crate::ui::layout::ROW_HEIGHT;
use crate::ui::theme::Theme;

/// Scrollable playlist. Each song takes two lines: a header with the cover
/// accent, number, title and duration, and a thin progress track underneath
/// that only fills for the song currently loaded in the engine.
pub struct SongList<'a> {
    songs: &'a [Song],
    current: Option<usize>,
    is_playing: bool,
    selected: usize,
    scroll: usize,
    position_ms: u64,
    total_ms: u64,
    theme: &'a Theme,
}

impl<'a> SongList<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        songs: &'a [Song],
        current: Option<usize>,
        is_playing: bool,
        selected: usize,
        scroll: usize,
        position_ms: u64,
        total_ms: u64,
        theme: &'a Theme,
    ) -> Self {
        Self {
            songs,
            current,
            is_playing,
            selected,
            scroll,
            position_ms,
            total_ms,
            theme,
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let lines = ["Playlist is empty", "press r to reload"];
        let y = area.y + area.height / 2;
        for (offset, text) in lines.iter().enumerate() {
            let row = y.saturating_add(offset as u16);
            if row >= area.bottom() {
                break;
            }
            let x = area.x + area.width.saturating_sub(text.width() as u16) / 2;
            buf.set_string(x, row, text, Style::default().fg(self.theme.muted));
        }
    }
}

impl Widget for SongList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.songs.is_empty() {
            self.render_empty(area, buf);
            return;
        }

        let visible = (area.height / ROW_HEIGHT) as usize;
        let rows = self
            .songs
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(visible);

        for (index, song) in rows {
            let y = area.y + ((index - self.scroll) as u16) * ROW_HEIGHT;
            let is_current = self.current == Some(index);

            if index == self.selected {
                let height = ROW_HEIGHT.min(area.bottom() - y);
                buf.set_style(
                    Rect::new(area.x, y, area.width, height),
                    Style::default().bg(self.theme.highlight),
                );
            }

            let icon = match (is_current, self.is_playing) {
                (true, true) => "▶ ",
                (true, false) => "⏸ ",
                (false, _) => "  ",
            };
            let header = Line::from(vec![
                Span::styled("▍ ", Style::default().fg(self.theme.cover_color(song))),
                Span::styled(
                    format!("{:>2} ", index + 1),
                    Style::default().fg(self.theme.muted),
                ),
                Span::styled(icon, Style::default().fg(self.theme.primary)),
                Span::styled(
                    song.title.clone(),
                    Style::default()
                        .fg(self.theme.foreground)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(song.artist.clone(), Style::default().fg(self.theme.muted)),
            ]);

            let total = fmt_mmss(song.duration.max(0.0) as u64);
            let total_width = total.width() as u16;
            let header_width = area.width.saturating_sub(total_width + 2);
            buf.set_line(area.x, y, &header, header_width);
            buf.set_string(
                area.right().saturating_sub(total_width + 1),
                y,
                total,
                Style::default().fg(self.theme.muted),
            );

            if y + 1 >= area.bottom() {
                continue;
            }

            // Progress track line, indented under the title.
            let indent: u16 = 7;
            let elapsed_width: u16 = 6;
            let track_width = area.width.saturating_sub(indent + elapsed_width + 1);
            let ratio = if is_current && self.total_ms > 0 {
                (self.position_ms as f64 / self.total_ms as f64).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let filled = (track_width as f64 * ratio).round() as usize;
            let track = Line::from(vec![
                Span::styled(
                    "━".repeat(filled),
                    Style::default().fg(self.theme.primary),
                ),
                Span::styled(
                    "─".repeat(track_width as usize - filled),
                    Style::default().fg(self.theme.muted),
                ),
            ]);
            buf.set_line(area.x + indent, y + 1, &track, track_width);

            if is_current {
                let elapsed = fmt_mmss(self.position_ms / 1000);
                buf.set_string(
                    area.right()
                        .saturating_sub(elapsed.width() as u16 + 1),
                    y + 1,
                    elapsed,
                    Style::default().fg(self.theme.secondary),
                );
            }
        }
    }
}
