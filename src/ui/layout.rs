use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Every playlist row takes two terminal lines: info and progress.
pub const ROW_HEIGHT: u16 = 2;
/// Total height of the player bar including its borders.
pub const PLAYER_HEIGHT: u16 = 5;

/// The three vertical regions of the screen. Computed the same way by the
/// render pass and by mouse hit-testing so clicks always land where the
/// widgets were drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Areas {
    pub list: Rect,
    pub player: Rect,
    pub hints: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(PLAYER_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    Areas {
        list: chunks[0],
        player: chunks[1],
        hints: chunks[2],
    }
}

/// The scrubber is the middle row inside the player bar's borders.
pub fn scrubber(player: Rect) -> Rect {
    Rect {
        x: player.x + 1,
        y: player.y + 2,
        width: player.width.saturating_sub(2),
        height: 1,
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Map a click column to a seek fraction of the scrubber width.
pub fn scrub_fraction(scrubber: Rect, column: u16) -> f64 {
    if scrubber.width == 0 || column < scrubber.x {
        return 0.0;
    }
    ((column - scrubber.x) as f64 / scrubber.width as f64).clamp(0.0, 1.0)
}

/// Which playlist row a click lands on, if any. Only fully drawn rows
/// count; a stray trailing line on an odd-height list is not a hit.
pub fn row_at(list: Rect, column: u16, row: u16, scroll: usize, len: usize) -> Option<usize> {
    if !contains(list, column, row) {
        return None;
    }
    let visible = (list.height / ROW_HEIGHT) as usize;
    let index = scroll + ((row - list.y) / ROW_HEIGHT) as usize;
    (index < scroll + visible && index < len).then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_bottom_up() {
        let a = areas(Rect::new(0, 0, 80, 24));
        assert_eq!(a.list.height, 24 - PLAYER_HEIGHT - 1);
        assert_eq!(a.player.y, a.list.height);
        assert_eq!(a.hints.y, 23);
    }

    #[test]
    fn scrub_fraction_maps_click_x_to_bar_width() {
        let bar = Rect::new(10, 5, 100, 1);
        assert_eq!(scrub_fraction(bar, 10), 0.0);
        assert_eq!(scrub_fraction(bar, 60), 0.5);
        assert_eq!(scrub_fraction(bar, 109), 0.99);
        // Clicks left of the bar clamp to the start.
        assert_eq!(scrub_fraction(bar, 3), 0.0);
    }

    #[test]
    fn scrubber_sits_inside_the_player_borders() {
        let player = Rect::new(0, 19, 80, PLAYER_HEIGHT);
        let bar = scrubber(player);
        assert_eq!(bar, Rect::new(1, 21, 78, 1));
    }

    #[test]
    fn row_hit_testing_accounts_for_scroll_and_row_height() {
        let list = Rect::new(0, 0, 80, 10);
        assert_eq!(row_at(list, 5, 0, 0, 20), Some(0));
        assert_eq!(row_at(list, 5, 1, 0, 20), Some(0));
        assert_eq!(row_at(list, 5, 2, 0, 20), Some(1));
        assert_eq!(row_at(list, 5, 2, 3, 20), Some(4));
        // Below the last song: no hit.
        assert_eq!(row_at(list, 5, 8, 0, 2), None);
        // Outside the list region: no hit.
        assert_eq!(row_at(list, 5, 12, 0, 20), None);
    }

    #[test]
    fn a_partial_trailing_row_is_not_a_hit() {
        // Height 5 draws two full rows; the fifth line belongs to a row
        // that was never rendered.
        let list = Rect::new(0, 0, 80, 5);
        assert_eq!(row_at(list, 5, 3, 0, 20), Some(1));
        assert_eq!(row_at(list, 5, 4, 0, 20), None);
        assert_eq!(row_at(list, 5, 4, 3, 20), None);
    }
}
