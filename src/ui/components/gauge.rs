use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::Widget,
};

/// One-line progress gauge with sub-cell resolution and a centered label.
#[derive(Debug, Default)]
pub struct ProgressGauge<'a> {
    ratio: f64,
    label: Option<Span<'a>>,
    filled_style: Style,
    empty_style: Style,
}

impl<'a> ProgressGauge<'a> {
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn label<T>(mut self, label: T) -> Self
    where
        T: Into<Span<'a>>,
    {
        self.label = Some(label.into());
        self
    }

    pub fn filled_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.filled_style = style.into();
        self
    }

    pub fn empty_style<S: Into<Style>>(mut self, style: S) -> Self {
        self.empty_style = style.into();
        self
    }
}

fn eighth_block(frac: f64) -> &'static str {
    match (frac * 8.0).round() as u16 {
        0 => " ",
        1 => symbols::block::ONE_EIGHTH,
        2 => symbols::block::ONE_QUARTER,
        3 => symbols::block::THREE_EIGHTHS,
        4 => symbols::block::HALF,
        5 => symbols::block::FIVE_EIGHTHS,
        6 => symbols::block::THREE_QUARTERS,
        7 => symbols::block::SEVEN_EIGHTHS,
        _ => symbols::block::FULL,
    }
}

impl Widget for ProgressGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let width = area.width as f64;
        let filled_pos = width * self.ratio;

        let label = self.label.unwrap_or_else(|| {
            Span::raw(format!("{}%", (self.ratio * 100.0).round() as u16))
        });
        let label_width = label.width() as u16;
        let label_col = area.left() + area.width.saturating_sub(label_width) / 2;
        let row = area.top();

        for x in area.left()..area.right() {
            let pos = (x - area.left()) as f64;

            let (mut symbol, style) = if pos < filled_pos {
                let symbol = if pos + 1.0 > filled_pos {
                    eighth_block(filled_pos - pos)
                } else {
                    symbols::block::FULL
                };
                (symbol, self.filled_style)
            } else {
                (" ", self.empty_style)
            };

            if x >= label_col && x < label_col + label_width {
                symbol = " ";
            }

            buf[(x, row)]
                .set_symbol(symbol)
                .set_fg(style.fg.unwrap_or_default())
                .set_bg(style.bg.unwrap_or_default());
        }

        buf.set_span(label_col, row, &label, label_width);
    }
}
