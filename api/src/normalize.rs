//! Schema-tolerant normalization: raw JSON payloads in, uniform records out.
//!
//! Source documents disagree on naming (`full_name` vs `teamName`), casing,
//! and nesting (bare arrays vs `scoreboard.games`). Each [`RecordKind`]
//! carries an alias table that reconciles the variants; anything that still
//! cannot be resolved becomes [`FieldValue::Unavailable`] rather than an
//! error. Pure functions of their input, no hidden state.

use crate::{FieldValue, Record, RecordKind, Scoreboard};
use serde_json::Value;

/// Normalize a raw payload into records of `kind`, preserving source order.
///
/// Accepted shapes: a JSON array of objects, an object wrapping an array
/// under one of the kind's known container paths, or a single object
/// (yielding one record). Anything else yields an empty sequence.
pub fn normalize(payload: &Value, kind: RecordKind) -> Vec<Record> {
    locate_entries(payload, kind)
        .into_iter()
        .map(|entry| project(entry, kind))
        .collect()
}

/// Normalize a live-scoreboard document. An absent or empty
/// `scoreboard.games` path is a valid result (nothing scheduled) and is
/// tagged [`Scoreboard::NoGames`] so the display layer can tell "no games
/// today" apart from a fetch failure.
pub fn normalize_scoreboard(payload: &Value) -> Scoreboard {
    let games = resolve(payload, "scoreboard.games").and_then(Value::as_array);
    match games {
        Some(games) if !games.is_empty() => Scoreboard::Games(
            games
                .iter()
                .map(|entry| {
                    let mut record = project(entry, RecordKind::Games);
                    record.set("source", FieldValue::text("feed"));
                    record
                })
                .collect(),
        ),
        _ => Scoreboard::NoGames,
    }
}

fn locate_entries<'a>(payload: &'a Value, kind: RecordKind) -> Vec<&'a Value> {
    match payload {
        Value::Array(entries) => entries.iter().collect(),
        Value::Object(_) => {
            for path in kind.containers() {
                if let Some(Value::Array(entries)) = resolve(payload, path) {
                    return entries.iter().collect();
                }
            }
            vec![payload]
        }
        _ => Vec::new(),
    }
}

/// Project one source entry onto the canonical field set of `kind`.
/// Aliases are tried in order; the first resolvable non-null value wins.
fn project(entry: &Value, kind: RecordKind) -> Record {
    let mut record = Record::new(kind);
    for spec in kind.schema() {
        for alias in spec.aliases {
            if let Some(value) = resolve(entry, alias) {
                let converted = to_field_value(value);
                if !converted.is_unavailable() {
                    record.set(spec.name, converted);
                    break;
                }
            }
        }
    }
    if kind == RecordKind::Games {
        coerce_game_status(&mut record);
    }
    record
}

/// Resolve a dotted alias path against a JSON value. Each segment is looked
/// up exactly first, then case-insensitively, so `teamname` still finds
/// `teamName`.
fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        let object = current.as_object()?;
        current = match object.get(segment) {
            Some(v) => v,
            None => object
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(segment))
                .map(|(_, v)| v)?,
        };
    }
    Some(current)
}

fn to_field_value(value: &Value) -> FieldValue {
    match value {
        Value::String(s) => FieldValue::Text(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FieldValue::Int(i),
            None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Unavailable),
        },
        Value::Bool(b) => FieldValue::Text(b.to_string()),
        // Objects and arrays have no flat rendering; the alias table should
        // point at a leaf inside them instead.
        Value::Null | Value::Object(_) | Value::Array(_) => FieldValue::Unavailable,
    }
}

/// The NBA live feed encodes game state numerically (1 scheduled, 2 live,
/// 3 final). Fold that into the textual status domain the dashboard uses.
fn coerce_game_status(record: &mut Record) {
    let status = match record.get("status").as_int() {
        Some(1) => "scheduled",
        Some(2) => "live",
        Some(3) => "finished",
        _ => return,
    };
    record.set("status", FieldValue::text(status));
}
