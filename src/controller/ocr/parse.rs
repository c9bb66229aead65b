use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::error::AppError;
use crate::model::{HOLES_PER_ROUND, HoleEntry, ScoreRecord};

/// Reply shape requested from the model. Everything is optional here; the
/// coercion below decides what survives.
#[derive(Deserialize)]
struct RawReply {
    course_name: Option<String>,
    date: Option<String>,
    holes: Option<Vec<RawHole>>,
}

#[derive(Deserialize)]
struct RawHole {
    #[serde(default)]
    par: Option<i32>,
    #[serde(default)]
    score: Option<i32>,
    #[serde(default)]
    putts: Option<i32>,
}

fn fence_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"```(?:json)?").expect("Invalid regex pattern - this is a programming error")
    })
}

/// The model sometimes wraps its JSON in markdown fences; remove them before
/// parsing.
#[must_use]
pub fn strip_code_fences(reply: &str) -> String {
    fence_regex().replace_all(reply, "").trim().to_string()
}

/// Parse a raw model reply into a `ScoreRecord`, validating and coercing on
/// ingestion: the holes sequence is padded with null-valued entries or
/// truncated to exactly 18, hole numbers are fixed by position, and both
/// totals are re-derived (the model's own totals are ignored).
///
/// # Errors
///
/// Returns `AppError::Extraction` when the reply is not the requested JSON
/// shape; no partial record is ever produced.
pub fn parse_extraction_reply(reply: &str) -> Result<ScoreRecord, AppError> {
    let cleaned = strip_code_fences(reply);
    let raw: RawReply = serde_json::from_str(&cleaned)
        .map_err(|e| AppError::Extraction(format!("malformed model reply: {e}")))?;

    let Some(raw_holes) = raw.holes else {
        return Err(AppError::Extraction("model reply had no holes array".into()));
    };

    let mut holes: Vec<HoleEntry> = raw_holes
        .into_iter()
        .take(HOLES_PER_ROUND)
        .enumerate()
        .map(|(i, h)| HoleEntry {
            number: (i + 1) as u8,
            par: h.par,
            score: h.score,
            putts: h.putts,
        })
        .collect();
    for number in (holes.len() + 1)..=HOLES_PER_ROUND {
        holes.push(HoleEntry::unfilled(number as u8));
    }

    let mut record = ScoreRecord {
        course_name: raw.course_name.unwrap_or_default(),
        date: raw.date.unwrap_or_default(),
        total_score: 0,
        total_putts: None,
        holes,
    };
    record.recompute_totals();
    Ok(record)
}
