use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use nba_api::client::{ApiError, NbaApi};
use nba_api::RecordKind;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the data client and serves fetch requests off the UI thread.
/// One request in flight at a time; every outcome, including failure,
/// comes back as a [`NetworkResponse`] so the UI can degrade instead of die.
pub struct NetworkWorker {
    client: NbaApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client: NbaApi::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadDataset { kind } => self.handle_load_dataset(kind).await,
                NetworkRequest::RefreshScoreboard => self.handle_refresh_scoreboard().await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_dataset(&self, kind: RecordKind) -> Result<NetworkResponse, ApiError> {
        debug!("loading dataset: {}", kind.label());
        let records = match kind {
            RecordKind::Teams => self.client.fetch_teams().await?,
            RecordKind::Players => self.client.fetch_players().await?,
            RecordKind::Games => self.client.fetch_recent_games().await?,
            RecordKind::Standings => self.client.fetch_standings().await?,
            RecordKind::TeamStats => self.client.fetch_team_stats().await?,
        };
        Ok(NetworkResponse::DatasetLoaded { kind, records })
    }

    async fn handle_refresh_scoreboard(&self) -> Result<NetworkResponse, ApiError> {
        debug!("refreshing today's scoreboard");
        let scoreboard = self.client.fetch_scoreboard().await?;
        Ok(NetworkResponse::ScoreboardLoaded { scoreboard })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
