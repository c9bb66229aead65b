use crate::model::ScoreRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoleField {
    Par,
    Score,
    Putts,
}

/// Apply one field-level correction to a hole from raw form input.
///
/// Empty input clears the field to null (unfilled, not zero). Numeric input
/// parses to an integer ("05" becomes 5). Non-numeric input leaves the field
/// unchanged and is reported by the `false` return, never by a panic.
/// Totals are re-derived immediately after every successful mutation.
pub fn set_hole_field(
    record: &mut ScoreRecord,
    hole_index: usize,
    field: HoleField,
    raw_value: &str,
) -> bool {
    let Some(hole) = record.holes.get_mut(hole_index) else {
        return false;
    };

    let trimmed = raw_value.trim();
    let new_value = if trimmed.is_empty() {
        None
    } else {
        match trimmed.parse::<i32>() {
            Ok(v) => Some(v),
            Err(_) => return false,
        }
    };

    match field {
        HoleField::Par => hole.par = new_value,
        HoleField::Score => hole.score = new_value,
        HoleField::Putts => hole.putts = new_value,
    }
    record.recompute_totals();
    true
}

/// Course name is replaced verbatim; empty is a valid (if save-blocking)
/// value.
pub fn set_course_name(record: &mut ScoreRecord, value: &str) {
    record.course_name = value.to_string();
}

pub fn set_date(record: &mut ScoreRecord, value: &str) {
    record.date = value.to_string();
}
