use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Re-request the scoreboard once a minute. The fetch cache bounds actual
/// network traffic to one call per freshness window; everything in between
/// is served from memory.
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut scoreboard_interval = interval(REFRESH_INTERVAL);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        scoreboard_interval.tick().await;

        loop {
            scoreboard_interval.tick().await;
            let _ = self
                .network_requests
                .send(NetworkRequest::RefreshScoreboard)
                .await;
        }
    }
}
