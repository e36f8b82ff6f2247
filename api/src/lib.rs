pub mod cache;
pub mod client;
pub mod normalize;
pub mod sample;

use std::fmt;

// ---------------------------------------------------------------------------
// Domain types: canonical record model, independent of source wire shapes
// ---------------------------------------------------------------------------

/// The datasets the dashboard knows how to normalize. Each kind carries a
/// fixed canonical field set; see [`RecordKind::schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Teams,
    Players,
    Games,
    Standings,
    TeamStats,
}

impl RecordKind {
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Teams => "Teams",
            RecordKind::Players => "Players",
            RecordKind::Games => "Games",
            RecordKind::Standings => "Standings",
            RecordKind::TeamStats => "Team Stats",
        }
    }

    /// Canonical field set for this kind, in display order. Every normalized
    /// record exposes exactly these fields; a field the source document did
    /// not provide is [`FieldValue::Unavailable`], never missing.
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            RecordKind::Teams => TEAM_FIELDS,
            RecordKind::Players => PLAYER_FIELDS,
            RecordKind::Games => GAME_FIELDS,
            RecordKind::Standings => STANDING_FIELDS,
            RecordKind::TeamStats => TEAM_STAT_FIELDS,
        }
    }

    /// Known wrapper paths: when a payload is an object rather than a bare
    /// array, the entry list may live under one of these dotted paths.
    pub(crate) fn containers(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Teams => &["teams", "league.standard"],
            RecordKind::Players => &["players", "league.standard"],
            RecordKind::Games => &["games", "scoreboard.games"],
            RecordKind::Standings => &["standings", "league.standard.teams"],
            RecordKind::TeamStats => &["teamStats", "stats", "league.standard.teams"],
        }
    }
}

/// One canonical field plus the source keys it may appear under. Aliases are
/// tried in order; dotted aliases descend into nested objects
/// (`homeTeam.teamName`); key matching falls back to case-insensitive.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

const fn field(name: &'static str, aliases: &'static [&'static str]) -> FieldSpec {
    FieldSpec { name, aliases }
}

static TEAM_FIELDS: &[FieldSpec] = &[
    field("id", &["id", "teamId"]),
    field("full_name", &["full_name", "teamName", "fullName", "name"]),
    field("city", &["city", "location"]),
    field("abbreviation", &["abbreviation", "tricode", "teamTricode"]),
    field("conference", &["conference", "confName"]),
    field("division", &["division", "divName"]),
];

static PLAYER_FIELDS: &[FieldSpec] = &[
    field("id", &["id", "playerId", "personId"]),
    field("name", &["name", "playerName", "displayName"]),
    field("team", &["team", "teamName", "teamId"]),
    field("position", &["position", "pos"]),
    field("jersey", &["jersey", "jerseyNumber", "number"]),
];

static GAME_FIELDS: &[FieldSpec] = &[
    field("game_id", &["game_id", "gameId", "id"]),
    field("date", &["date", "gameTimeUTC", "gameDate", "startTimeUTC"]),
    field("home_team", &["home_team", "homeTeam.teamName", "hTeam.fullName", "homeTeam"]),
    field("away_team", &["away_team", "awayTeam.teamName", "vTeam.fullName", "awayTeam"]),
    field("home_score", &["home_score", "homeTeam.score", "hTeam.score", "homeScore"]),
    field("away_score", &["away_score", "awayTeam.score", "vTeam.score", "awayScore"]),
    field("status", &["status", "gameStatus", "gameStatusText"]),
    field("period", &["period", "period.current", "currentPeriod"]),
    // Provenance tag: "feed" for rows from a real endpoint, "sample" for
    // generated placeholders. Never read from upstream documents.
    field("source", &["source"]),
];

static STANDING_FIELDS: &[FieldSpec] = &[
    field("team", &["team", "teamName", "full_name", "teamSitesOnly.teamName"]),
    field("wins", &["wins", "win", "w"]),
    field("losses", &["losses", "loss", "l"]),
    field("win_pct", &["win_pct", "winPct", "winPctV2", "pct"]),
    field("conference", &["conference", "confName"]),
    field("rank", &["rank", "confRank", "seed"]),
];

static TEAM_STAT_FIELDS: &[FieldSpec] = &[
    field("team", &["team", "teamName", "full_name"]),
    field("games_played", &["games_played", "gamesPlayed", "gp", "games"]),
    field("points", &["points", "ppg", "pts"]),
    field("rebounds", &["rebounds", "rpg", "reb"]),
    field("assists", &["assists", "apg", "ast"]),
];

/// A single normalized field value. `Unavailable` is the sentinel for a
/// field the source document did not carry; downstream code can always
/// render it, so missing upstream keys never become key errors.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Unavailable,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FieldValue::Unavailable)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Best-effort numeric view: several feeds ship numbers as strings
    /// ("0.756", "102"), so `Text` is parsed here rather than rejected.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::Float(x) => Some(*x),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::Unavailable => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Unavailable => write!(f, "N/A"),
        }
    }
}

static UNAVAILABLE: FieldValue = FieldValue::Unavailable;

/// One normalized row: the canonical fields of its kind, in schema order.
/// [`Record::get`] is total over the field set, so the display layer never
/// has to branch on presence.
#[derive(Debug, Clone)]
pub struct Record {
    kind: RecordKind,
    values: Vec<FieldValue>,
}

impl Record {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            values: vec![FieldValue::Unavailable; kind.schema().len()],
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> &FieldValue {
        self.kind
            .schema()
            .iter()
            .position(|spec| spec.name == name)
            .and_then(|i| self.values.get(i))
            .unwrap_or(&UNAVAILABLE)
    }

    /// Set a canonical field. Unknown names are ignored; the field set of a
    /// kind is fixed.
    pub fn set(&mut self, name: &str, value: FieldValue) {
        if let Some(i) = self.kind.schema().iter().position(|spec| spec.name == name) {
            self.values[i] = value;
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.kind
            .schema()
            .iter()
            .zip(self.values.iter())
            .map(|(spec, value)| (spec.name, value))
    }

    /// True for generated placeholder rows (see [`sample::sample_games`]).
    pub fn is_sample(&self) -> bool {
        self.get("source").as_text() == Some("sample")
    }
}

/// Outcome of normalizing a live-scoreboard document. `NoGames` tags the
/// absent or empty `scoreboard.games` path as a valid empty state ("nothing
/// scheduled today"), distinct from a fetch failure.
#[derive(Debug, Clone)]
pub enum Scoreboard {
    Games(Vec<Record>),
    NoGames,
}

impl Scoreboard {
    pub fn games(&self) -> &[Record] {
        match self {
            Scoreboard::Games(games) => games,
            Scoreboard::NoGames => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_record_exposes_the_full_field_set() {
        let record = Record::new(RecordKind::Teams);
        assert_eq!(record.fields().count(), RecordKind::Teams.schema().len());
        for (_, value) in record.fields() {
            assert!(value.is_unavailable());
        }
    }

    #[test]
    fn get_is_total_even_for_unknown_fields() {
        let record = Record::new(RecordKind::Players);
        assert!(record.get("no_such_field").is_unavailable());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut record = Record::new(RecordKind::Teams);
        record.set("full_name", FieldValue::text("Lakers"));
        assert_eq!(record.get("full_name").as_text(), Some("Lakers"));
    }

    #[test]
    fn unavailable_renders_as_na() {
        assert_eq!(FieldValue::Unavailable.to_string(), "N/A");
    }

    #[test]
    fn numeric_view_parses_string_numbers() {
        assert_eq!(FieldValue::text("0.756").as_f64(), Some(0.756));
        assert_eq!(FieldValue::Int(102).as_f64(), Some(102.0));
        assert_eq!(FieldValue::text("Lakers").as_f64(), None);
    }
}
