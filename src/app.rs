use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use nba_api::{Record, RecordKind, Scoreboard};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Teams,
    Players,
    Scoreboard,
    Standings,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_dataset_loaded(&mut self, kind: RecordKind, records: Vec<Record>) {
        self.state.last_error = None;
        self.state.load_dataset(kind, records);
    }

    pub fn on_scoreboard_loaded(&mut self, scoreboard: Scoreboard) {
        self.state.last_error = None;
        self.state.load_scoreboard(scoreboard);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Navigation, delegated to the active tab's table
    // -----------------------------------------------------------------------

    pub fn select_next(&mut self) {
        let tab = self.state.active_tab;
        if let Some(table) = self.state.table_for(tab) {
            table.select_next();
        }
    }

    pub fn select_prev(&mut self) {
        let tab = self.state.active_tab;
        if let Some(table) = self.state.table_for(tab) {
            table.select_prev();
        }
    }

    pub fn cycle_team_filter(&mut self) {
        self.state.cycle_team_filter();
    }

    /// Which dataset a manual refresh on the current tab should re-request.
    pub fn active_dataset(&self) -> Option<RecordKind> {
        match self.state.active_tab {
            MenuItem::Teams => Some(RecordKind::Teams),
            MenuItem::Players => Some(RecordKind::Players),
            MenuItem::Scoreboard => Some(RecordKind::Games),
            MenuItem::Standings => Some(RecordKind::Standings),
            MenuItem::Help => None,
        }
    }
}
