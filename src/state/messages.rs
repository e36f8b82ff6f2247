use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use nba_api::{Record, RecordKind, Scoreboard};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadDataset { kind: RecordKind },
    RefreshScoreboard,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    DatasetLoaded { kind: RecordKind, records: Vec<Record> },
    ScoreboardLoaded { scoreboard: Scoreboard },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
