use crate::ui::theme::ThemeName;

/// Transient view state: the keyboard cursor over the list, the scroll
/// offset, and whatever diagnostic is currently shown in the player bar.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected: usize,
    pub scroll: usize,
    pub is_loading: bool,
    pub status: Option<String>,
    pub theme: ThemeName,
}

impl UiState {
    pub fn move_down(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn jump_first(&mut self) {
        self.selected = 0;
    }

    pub fn jump_last(&mut self, len: usize) {
        if len > 0 {
            self.selected = len - 1;
        }
    }

    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.scroll = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    /// Keep the selection inside the viewport of `visible` rows.
    pub fn scroll_to_selection(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_is_clamped_to_the_list() {
        let mut ui = UiState::default();
        ui.move_up();
        assert_eq!(ui.selected, 0);

        ui.move_down(3);
        ui.move_down(3);
        ui.move_down(3);
        assert_eq!(ui.selected, 2);

        ui.jump_last(3);
        assert_eq!(ui.selected, 2);
        ui.jump_first();
        assert_eq!(ui.selected, 0);
    }

    #[test]
    fn shrinking_list_pulls_the_selection_back() {
        let mut ui = UiState {
            selected: 7,
            ..Default::default()
        };
        ui.clamp_selection(3);
        assert_eq!(ui.selected, 2);
        ui.clamp_selection(0);
        assert_eq!(ui.selected, 0);
    }

    #[test]
    fn scroll_follows_the_selection_both_ways() {
        let mut ui = UiState::default();
        ui.selected = 9;
        ui.scroll_to_selection(5);
        assert_eq!(ui.scroll, 5);

        ui.selected = 2;
        ui.scroll_to_selection(5);
        assert_eq!(ui.scroll, 2);
    }
}
