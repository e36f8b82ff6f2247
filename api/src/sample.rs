//! Placeholder game results, generated from the team table when no real
//! results feed is configured. Every record carries `source = "sample"` so
//! the display layer can label it; these stand in for a feed, they do not
//! impersonate one.

use crate::{FieldValue, Record, RecordKind};
use chrono::Utc;
use rand::Rng;
use std::collections::HashSet;

/// Scores are drawn uniformly from this range, plausible NBA final scores.
const SCORE_MIN: i64 = 90;
const SCORE_MAX: i64 = 120;

/// The leading records of each batch are marked live; the rest finished.
const LIVE_COUNT: usize = 2;

/// Generate `n` placeholder game records over `teams`.
///
/// Home and away are always distinct, and an exact (home, away) pairing is
/// not repeated within one call while the pool still allows it. The first
/// [`LIVE_COUNT`] records are "live" with a random period 1–4; the remainder
/// are "finished" with period 4. A pool of fewer than two teams yields
/// nothing.
pub fn sample_games(teams: &[Record], n: usize) -> Vec<Record> {
    if teams.len() < 2 {
        return Vec::new();
    }

    let mut rng = rand::thread_rng();
    let mut used: HashSet<(usize, usize)> = HashSet::new();
    let today = Utc::now().format("%Y-%m-%d").to_string();

    (0..n)
        .map(|i| {
            let (home, away) = pick_pair(&mut rng, teams.len(), &used);
            used.insert((home, away));

            let mut record = Record::new(RecordKind::Games);
            record.set("game_id", FieldValue::Text(format!("sample-{:03}", i + 1)));
            record.set("date", FieldValue::text(&today));
            record.set("home_team", display_name(&teams[home]));
            record.set("away_team", display_name(&teams[away]));
            record.set("home_score", FieldValue::Int(rng.gen_range(SCORE_MIN..=SCORE_MAX)));
            record.set("away_score", FieldValue::Int(rng.gen_range(SCORE_MIN..=SCORE_MAX)));
            if i < LIVE_COUNT {
                record.set("status", FieldValue::text("live"));
                record.set("period", FieldValue::Int(rng.gen_range(1..=4)));
            } else {
                record.set("status", FieldValue::text("finished"));
                record.set("period", FieldValue::Int(4));
            }
            record.set("source", FieldValue::text("sample"));
            record
        })
        .collect()
}

/// Pick a random (home, away) index pair with home != away, avoiding pairs
/// already used this batch. Small pools run out of unused pairs, so the
/// retry loop is bounded and the fallback only guarantees distinctness.
fn pick_pair(rng: &mut impl Rng, pool: usize, used: &HashSet<(usize, usize)>) -> (usize, usize) {
    for _ in 0..32 {
        let home = rng.gen_range(0..pool);
        let away = rng.gen_range(0..pool);
        if home != away && !used.contains(&(home, away)) {
            return (home, away);
        }
    }
    let home = rng.gen_range(0..pool);
    (home, (home + 1) % pool)
}

fn display_name(team: &Record) -> FieldValue {
    let name = team.get("full_name");
    if name.is_unavailable() {
        team.get("abbreviation").clone()
    } else {
        name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(name: &str) -> Record {
        let mut record = Record::new(RecordKind::Teams);
        record.set("full_name", FieldValue::text(name));
        record
    }

    fn pool(n: usize) -> Vec<Record> {
        (0..n).map(|i| team(&format!("Team {i}"))).collect()
    }

    #[test]
    fn five_games_over_a_small_pool() {
        let games = sample_games(&pool(4), 5);
        assert_eq!(games.len(), 5);

        for game in &games {
            assert_ne!(
                game.get("home_team").as_text(),
                game.get("away_team").as_text(),
                "a team cannot play itself"
            );
            let home = game.get("home_score").as_int().unwrap();
            let away = game.get("away_score").as_int().unwrap();
            assert!((SCORE_MIN..=SCORE_MAX).contains(&home));
            assert!((SCORE_MIN..=SCORE_MAX).contains(&away));
            assert!(game.is_sample());
        }

        let live: Vec<_> = games.iter().filter(|g| g.get("status").as_text() == Some("live")).collect();
        assert_eq!(live.len(), 2);
        for game in &live {
            let period = game.get("period").as_int().unwrap();
            assert!((1..=4).contains(&period));
        }

        let finished: Vec<_> = games
            .iter()
            .filter(|g| g.get("status").as_text() == Some("finished"))
            .collect();
        assert_eq!(finished.len(), 3);
        for game in finished {
            assert_eq!(game.get("period").as_int(), Some(4));
        }
    }

    #[test]
    fn two_team_pool_still_produces_requested_count() {
        let games = sample_games(&pool(2), 5);
        assert_eq!(games.len(), 5);
        for game in &games {
            assert_ne!(
                game.get("home_team").as_text(),
                game.get("away_team").as_text()
            );
        }
    }

    #[test]
    fn pairings_are_not_repeated_when_the_pool_allows() {
        let games = sample_games(&pool(10), 5);
        let pairs: HashSet<_> = games
            .iter()
            .map(|g| (g.get("home_team").to_string(), g.get("away_team").to_string()))
            .collect();
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn undersized_pool_yields_nothing() {
        assert!(sample_games(&pool(1), 5).is_empty());
        assert!(sample_games(&[], 3).is_empty());
    }

    #[test]
    fn zero_requested_yields_nothing() {
        assert!(sample_games(&pool(4), 0).is_empty());
    }

    #[test]
    fn falls_back_to_abbreviation_when_name_is_unavailable() {
        let mut anon = Record::new(RecordKind::Teams);
        anon.set("abbreviation", FieldValue::text("LAL"));
        let games = sample_games(&[anon.clone(), anon], 1);
        assert_eq!(games[0].get("home_team").as_text(), Some("LAL"));
    }
}
