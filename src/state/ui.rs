#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum AppMode {
    Login,
    Signup,
    Board,
    Achievements,
}

/// Which part of the board receives keys.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum BoardFocus {
    Deals,
    Search,
    Chat,
}

/// State management for UI-specific state
pub struct UiState {
    pub mode: AppMode,
    pub should_quit: bool,
    pub tick_count: u64,

    pub board_focus: BoardFocus,
    /// Row selected within the current page.
    pub selected_row: usize,

    // Quit confirmation
    pub show_quit_confirm: bool,
    pub quit_confirm_selected: usize,

    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            mode: AppMode::Login,
            should_quit: false,
            tick_count: 0,
            board_focus: BoardFocus::Deals,
            selected_row: 0,
            show_quit_confirm: false,
            quit_confirm_selected: 0,
            show_help: false,
        }
    }
}

impl UiState {
    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
        self.board_focus = BoardFocus::Deals;
        self.selected_row = 0;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn tick(&mut self) {
        self.tick_count += 1;
    }

    pub fn select_row(&mut self, down: bool, rows: usize) {
        if rows == 0 {
            self.selected_row = 0;
        } else if down {
            self.selected_row = (self.selected_row + 1).min(rows - 1);
        } else {
            self.selected_row = self.selected_row.saturating_sub(1);
        }
    }

    pub fn open_quit_confirm(&mut self) {
        self.show_quit_confirm = true;
        self.quit_confirm_selected = 1; // default to "No"
    }

    pub fn close_quit_confirm(&mut self) {
        self.show_quit_confirm = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_selection_is_clamped() {
        let mut ui = UiState::default();
        ui.select_row(true, 3);
        ui.select_row(true, 3);
        ui.select_row(true, 3);
        assert_eq!(ui.selected_row, 2);
        ui.select_row(false, 3);
        assert_eq!(ui.selected_row, 1);
        ui.select_row(true, 0);
        assert_eq!(ui.selected_row, 0);
    }
}
