use ratatui::widgets::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Contributors,
    Folders,
}

#[derive(Debug, Default)]
pub struct DashboardState {
    pub focus: Focus,
    pub contributors: ListState,
    pub folders: ListState,
}

impl DashboardState {
    pub fn new(contributors: usize, folders: usize) -> Self {
        let mut state = Self::default();
        if contributors > 0 {
            state.contributors.select(Some(0));
        }
        if folders > 0 {
            state.folders.select(Some(0));
        }
        state
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Contributors => Focus::Folders,
            Focus::Folders => Focus::Contributors,
        };
    }

    pub fn scroll_down(&mut self, contributors: usize, folders: usize) {
        let (list, len) = self.focused(contributors, folders);
        if len == 0 {
            return;
        }
        let next = list.selected().map_or(0, |i| (i + 1).min(len - 1));
        list.select(Some(next));
    }

    pub fn scroll_up(&mut self, contributors: usize, folders: usize) {
        let (list, len) = self.focused(contributors, folders);
        if len == 0 {
            return;
        }
        let prev = list.selected().map_or(0, |i| i.saturating_sub(1));
        list.select(Some(prev));
    }

    fn focused(&mut self, contributors: usize, folders: usize) -> (&mut ListState, usize) {
        match self.focus {
            Focus::Contributors => (&mut self.contributors, contributors),
            Focus::Folders => (&mut self.folders, folders),
        }
    }
}
