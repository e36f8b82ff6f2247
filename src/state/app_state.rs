use crate::app::MenuItem;
use nba_api::{Record, RecordKind, Scoreboard};

// ---------------------------------------------------------------------------
// Table state
// ---------------------------------------------------------------------------

/// Records plus a cursor. Selection is clamped on load so a refresh that
/// shrinks the table never leaves the cursor dangling.
#[derive(Debug, Default)]
pub struct TableView {
    pub records: Vec<Record>,
    pub selected: usize,
}

impl TableView {
    pub fn load(&mut self, records: Vec<Record>) {
        self.records = records;
        self.selected = self.selected.min(self.records.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        let max = self.records.len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_record(&self) -> Option<&Record> {
        self.records.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Scoreboard state
// ---------------------------------------------------------------------------

/// What the Scoreboard tab should show. `Empty` means nothing scheduled:
/// an informative state, not an error; errors land in `AppState::last_error`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ScoreboardView {
    #[default]
    Pending,
    Games,
    Empty,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub teams: TableView,
    pub players: TableView,
    pub standings: TableView,
    pub team_stats: Vec<Record>,
    /// Recent results: real feed rows or labeled samples (see Record::is_sample).
    pub recent_games: TableView,
    pub scoreboard_games: TableView,
    pub scoreboard: ScoreboardView,
    /// Index into `teams` used to filter the Players tab; None shows everyone.
    pub team_filter: Option<usize>,
    pub last_error: Option<String>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            teams: TableView::default(),
            players: TableView::default(),
            standings: TableView::default(),
            team_stats: Vec::new(),
            recent_games: TableView::default(),
            scoreboard_games: TableView::default(),
            scoreboard: ScoreboardView::default(),
            team_filter: None,
            last_error: None,
            show_logs: false,
        }
    }

    pub fn load_dataset(&mut self, kind: RecordKind, records: Vec<Record>) {
        match kind {
            RecordKind::Teams => {
                self.teams.load(records);
                // The filter indexes into the team table; a reload invalidates it.
                self.team_filter = None;
            }
            RecordKind::Players => self.players.load(records),
            RecordKind::Games => self.recent_games.load(records),
            RecordKind::Standings => self.standings.load(records),
            RecordKind::TeamStats => self.team_stats = records,
        }
    }

    pub fn load_scoreboard(&mut self, scoreboard: Scoreboard) {
        match scoreboard {
            Scoreboard::Games(games) => {
                self.scoreboard_games.load(games);
                self.scoreboard = ScoreboardView::Games;
            }
            Scoreboard::NoGames => {
                self.scoreboard_games.load(Vec::new());
                self.scoreboard = ScoreboardView::Empty;
            }
        }
    }

    /// Advance the Players-tab team filter: all teams in table order, then
    /// back to "everyone".
    pub fn cycle_team_filter(&mut self) {
        self.team_filter = match self.team_filter {
            None if !self.teams.records.is_empty() => Some(0),
            Some(i) if i + 1 < self.teams.records.len() => Some(i + 1),
            _ => None,
        };
        self.players.selected = 0;
    }

    pub fn filter_team(&self) -> Option<&Record> {
        self.teams.records.get(self.team_filter?)
    }

    /// Players visible on the Players tab under the current filter.
    pub fn filtered_players(&self) -> Vec<&Record> {
        let Some(team) = self.filter_team() else {
            return self.players.records.iter().collect();
        };
        self.players
            .records
            .iter()
            .filter(|p| player_matches_team(p, team))
            .collect()
    }

    /// Stats row for the currently selected team, if the stats dataset has one.
    pub fn stats_for_selected_team(&self) -> Option<&Record> {
        let team = self.teams.selected_record()?;
        let name = team.get("full_name").as_text()?;
        self.team_stats
            .iter()
            .find(|s| s.get("team").as_text() == Some(name))
    }

    /// The table the j/k keys operate on for the given tab, if any.
    pub fn table_for(&mut self, tab: MenuItem) -> Option<&mut TableView> {
        match tab {
            MenuItem::Teams => Some(&mut self.teams),
            MenuItem::Players => Some(&mut self.players),
            MenuItem::Scoreboard => Some(match self.scoreboard {
                ScoreboardView::Games => &mut self.scoreboard_games,
                _ => &mut self.recent_games,
            }),
            MenuItem::Standings => Some(&mut self.standings),
            MenuItem::Help => None,
        }
    }
}

/// A player row may reference its team by id, name, or abbreviation
/// depending on the source document; accept any of them.
fn player_matches_team(player: &Record, team: &Record) -> bool {
    let reference = player.get("team").to_string();
    if reference == "N/A" {
        return false;
    }
    ["id", "full_name", "abbreviation"]
        .iter()
        .any(|field| team.get(field).to_string() == reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nba_api::FieldValue;

    fn team(id: i64, name: &str) -> Record {
        let mut record = Record::new(RecordKind::Teams);
        record.set("id", FieldValue::Int(id));
        record.set("full_name", FieldValue::text(name));
        record
    }

    fn player(name: &str, team_ref: &str) -> Record {
        let mut record = Record::new(RecordKind::Players);
        record.set("name", FieldValue::text(name));
        record.set("team", FieldValue::text(team_ref));
        record
    }

    #[test]
    fn selection_is_clamped_when_a_reload_shrinks_the_table() {
        let mut view = TableView::default();
        view.load(vec![team(1, "A"), team(2, "B"), team(3, "C")]);
        view.select_next();
        view.select_next();
        assert_eq!(view.selected, 2);
        view.load(vec![team(1, "A")]);
        assert_eq!(view.selected, 0);
    }

    #[test]
    fn selection_does_not_run_off_either_end() {
        let mut view = TableView::default();
        view.load(vec![team(1, "A"), team(2, "B")]);
        view.select_prev();
        assert_eq!(view.selected, 0);
        view.select_next();
        view.select_next();
        view.select_next();
        assert_eq!(view.selected, 1);
    }

    #[test]
    fn team_filter_cycles_through_teams_and_back_to_everyone() {
        let mut state = AppState::new();
        state.load_dataset(RecordKind::Teams, vec![team(1, "Lakers"), team(2, "Celtics")]);

        assert!(state.team_filter.is_none());
        state.cycle_team_filter();
        assert_eq!(state.team_filter, Some(0));
        state.cycle_team_filter();
        assert_eq!(state.team_filter, Some(1));
        state.cycle_team_filter();
        assert!(state.team_filter.is_none());
    }

    #[test]
    fn players_are_filtered_by_id_or_name() {
        let mut state = AppState::new();
        state.load_dataset(RecordKind::Teams, vec![team(1, "Lakers"), team(2, "Celtics")]);
        state.load_dataset(
            RecordKind::Players,
            vec![player("LeBron James", "1"), player("Jayson Tatum", "Celtics")],
        );

        assert_eq!(state.filtered_players().len(), 2);
        state.cycle_team_filter(); // Lakers
        let visible = state.filtered_players();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].get("name").as_text(), Some("LeBron James"));
        state.cycle_team_filter(); // Celtics
        let visible = state.filtered_players();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].get("name").as_text(), Some("Jayson Tatum"));
    }

    #[test]
    fn reloading_teams_resets_the_filter() {
        let mut state = AppState::new();
        state.load_dataset(RecordKind::Teams, vec![team(1, "Lakers")]);
        state.cycle_team_filter();
        assert!(state.team_filter.is_some());
        state.load_dataset(RecordKind::Teams, vec![team(2, "Celtics")]);
        assert!(state.team_filter.is_none());
    }

    #[test]
    fn no_games_maps_to_the_empty_view_not_an_error() {
        let mut state = AppState::new();
        state.load_scoreboard(Scoreboard::NoGames);
        assert!(matches!(state.scoreboard, ScoreboardView::Empty));
        assert!(state.last_error.is_none());
    }

    #[test]
    fn stats_lookup_matches_on_team_name() {
        let mut state = AppState::new();
        state.load_dataset(RecordKind::Teams, vec![team(1, "Nuggets")]);
        let mut stats = Record::new(RecordKind::TeamStats);
        stats.set("team", FieldValue::text("Nuggets"));
        stats.set("points", FieldValue::Float(114.2));
        state.load_dataset(RecordKind::TeamStats, vec![stats]);

        let row = state.stats_for_selected_team().expect("stats row");
        assert_eq!(row.get("points").as_f64(), Some(114.2));
    }
}
