use crate::cache::{DEFAULT_FRESHNESS, FetchCache};
use crate::normalize::{normalize, normalize_scoreboard};
use crate::sample::sample_games;
use crate::{Record, RecordKind, Scoreboard};
use log::debug;
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const TEAMS_URL: &str = "https://raw.githubusercontent.com/bttmly/nba/master/data/teams.json";
const PLAYERS_URL: &str = "https://raw.githubusercontent.com/bttmly/nba/master/data/players.json";
const SCOREBOARD_URL: &str =
    "https://cdn.nba.com/static/json/liveData/scoreboard/todaysScoreboard_00.json";
const STANDINGS_URL: &str = "https://data.nba.net/prod/v1/current/standings_all.json";
const TEAM_STATS_URL: &str = "https://data.nba.net/prod/v1/current/team_stats_rankings.json";

/// How many placeholder games to generate when no results feed is configured.
const SAMPLE_GAME_COUNT: usize = 5;

/// The remote JSON documents the dashboard reads. Static configuration;
/// one URL per logical dataset, fixed at construction. `recent_games` is
/// optional: with no results feed configured, the client generates labeled
/// sample games from the team table instead.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub teams: String,
    pub players: String,
    pub recent_games: Option<String>,
    pub todays_games: String,
    pub standings: String,
    pub team_stats: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            teams: TEAMS_URL.to_owned(),
            players: PLAYERS_URL.to_owned(),
            recent_games: None,
            todays_games: SCOREBOARD_URL.to_owned(),
            standings: STANDINGS_URL.to_owned(),
            team_stats: TEAM_STATS_URL.to_owned(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// NBA dashboard data client: HTTP fetches behind a TTL cache, plus
/// normalized accessors per dataset.
///
/// Fetch failures are reported as [`ApiError`] values and never cached, so
/// the next call retries the network. Concurrent callers racing on the same
/// endpoint may each hit the network once, fine for a low-QPS reporting
/// tool, and the cache converges on whichever response lands last.
#[derive(Debug)]
pub struct NbaApi {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
    cache: Mutex<FetchCache>,
}

impl Default for NbaApi {
    fn default() -> Self {
        Self::with_config(Endpoints::default(), DEFAULT_FRESHNESS, Duration::from_secs(10))
    }
}

impl NbaApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(endpoints: Endpoints, freshness: Duration, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent("nbatui/0.1 (terminal dashboard)")
                .build()
                .unwrap_or_default(),
            endpoints,
            timeout,
            cache: Mutex::new(FetchCache::new(freshness)),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Drop all cached payloads; the next fetch per endpoint goes to the
    /// network regardless of age.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Fetch one JSON document, memoized per URL for the freshness window.
    ///
    /// A cache hit returns the stored payload with no network access.
    /// Otherwise the endpoint is fetched with a per-request timeout; a
    /// transport failure, non-2xx status, or non-JSON body is returned as an
    /// [`ApiError`] and nothing is cached.
    pub async fn fetch(&self, url: &str) -> ApiResult<Value> {
        if let Some(payload) = self.lock_cache().fresh(url) {
            debug!("cache hit for {url}");
            return Ok(payload);
        }

        debug!("fetching {url}");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))?;

        self.lock_cache().store(url, payload.clone());
        Ok(payload)
    }

    pub async fn fetch_teams(&self) -> ApiResult<Vec<Record>> {
        let payload = self.fetch(&self.endpoints.teams).await?;
        Ok(normalize(&payload, RecordKind::Teams))
    }

    pub async fn fetch_players(&self) -> ApiResult<Vec<Record>> {
        let payload = self.fetch(&self.endpoints.players).await?;
        Ok(normalize(&payload, RecordKind::Players))
    }

    pub async fn fetch_standings(&self) -> ApiResult<Vec<Record>> {
        let payload = self.fetch(&self.endpoints.standings).await?;
        Ok(normalize(&payload, RecordKind::Standings))
    }

    pub async fn fetch_team_stats(&self) -> ApiResult<Vec<Record>> {
        let payload = self.fetch(&self.endpoints.team_stats).await?;
        Ok(normalize(&payload, RecordKind::TeamStats))
    }

    /// Today's games from the live scoreboard. [`Scoreboard::NoGames`] is a
    /// valid empty state, not a failure.
    pub async fn fetch_scoreboard(&self) -> ApiResult<Scoreboard> {
        let payload = self.fetch(&self.endpoints.todays_games).await?;
        Ok(normalize_scoreboard(&payload))
    }

    /// Recent game results. With a configured results feed the rows come
    /// from it, tagged `source = "feed"`; without one, labeled sample games
    /// are generated from the team table.
    pub async fn fetch_recent_games(&self) -> ApiResult<Vec<Record>> {
        match self.endpoints.recent_games.as_deref() {
            Some(url) => {
                let payload = self.fetch(url).await?;
                let mut records = normalize(&payload, RecordKind::Games);
                for record in &mut records {
                    if record.get("source").is_unavailable() {
                        record.set("source", crate::FieldValue::text("feed"));
                    }
                }
                Ok(records)
            }
            None => {
                debug!("no results feed configured, generating sample games");
                let teams = self.fetch_teams().await?;
                Ok(sample_games(&teams, SAMPLE_GAME_COUNT))
            }
        }
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, FetchCache> {
        // A poisoned lock only means another caller panicked mid-insert;
        // the map itself is still usable.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_api(freshness: Duration) -> NbaApi {
        NbaApi::with_config(Endpoints::default(), freshness, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn second_fetch_within_window_is_served_from_cache() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/teams.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"teamName":"Lakers"}]"#)
            .expect(1)
            .create_async()
            .await;

        let url = format!("{}/teams.json", server.url());
        let api = test_api(DEFAULT_FRESHNESS);

        let first = api.fetch(&url).await.expect("first fetch");
        let second = api.fetch(&url).await.expect("second fetch");
        assert_eq!(first, second);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn expired_entry_triggers_a_second_network_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/teams.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let url = format!("{}/teams.json", server.url());
        let api = test_api(Duration::from_millis(10));

        api.fetch(&url).await.expect("first fetch");
        tokio::time::sleep(Duration::from_millis(25)).await;
        api.fetch(&url).await.expect("refetch after expiry");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn server_error_is_reported_and_not_cached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/standings.json")
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let url = format!("{}/standings.json", server.url());
        let api = test_api(DEFAULT_FRESHNESS);

        let first = api.fetch(&url).await;
        assert!(matches!(first, Err(ApiError::Api(..))));
        // Failure was not cached: the retry goes to the network again.
        let second = api.fetch(&url).await;
        assert!(matches!(second, Err(ApiError::Api(..))));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/teams.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let url = format!("{}/teams.json", server.url());
        let api = test_api(DEFAULT_FRESHNESS);
        let result = api.fetch(&url).await;
        assert!(matches!(result, Err(ApiError::Parsing(..))));
    }

    #[tokio::test]
    async fn clear_cache_forces_a_refetch() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/teams.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(2)
            .create_async()
            .await;

        let url = format!("{}/teams.json", server.url());
        let api = test_api(DEFAULT_FRESHNESS);
        api.fetch(&url).await.expect("first fetch");
        api.clear_cache();
        api.fetch(&url).await.expect("fetch after clear");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn recent_games_fall_back_to_labeled_samples() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/teams.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"teamName":"Lakers"},{"teamName":"Celtics"},{"teamName":"Suns"}]"#)
            .create_async()
            .await;

        let endpoints = Endpoints {
            teams: format!("{}/teams.json", server.url()),
            recent_games: None,
            ..Endpoints::default()
        };
        let api = NbaApi::with_config(endpoints, DEFAULT_FRESHNESS, Duration::from_secs(5));

        let games = api.fetch_recent_games().await.expect("sample games");
        assert_eq!(games.len(), SAMPLE_GAME_COUNT);
        assert!(games.iter().all(Record::is_sample));
    }

    #[tokio::test]
    async fn scoreboard_distinguishes_no_games_from_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/scoreboard.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"scoreboard":{"gameDate":"2026-08-23","games":[]}}"#)
            .create_async()
            .await;

        let endpoints = Endpoints {
            todays_games: format!("{}/scoreboard.json", server.url()),
            ..Endpoints::default()
        };
        let api = NbaApi::with_config(endpoints, DEFAULT_FRESHNESS, Duration::from_secs(5));

        let scoreboard = api.fetch_scoreboard().await.expect("valid empty state");
        assert!(matches!(scoreboard, Scoreboard::NoGames));
    }
}
