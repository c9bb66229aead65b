use crate::model::record::ScoreRecord;

pub const SCORE_MIN: i32 = 1;
pub const SCORE_MAX: i32 = 15;
pub const PUTTS_MIN: i32 = 0;
pub const PUTTS_MAX: i32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleValidity {
    pub score_ok: bool,
    pub putts_ok: bool,
}

impl HoleValidity {
    #[must_use]
    pub fn is_ok(self) -> bool {
        self.score_ok && self.putts_ok
    }
}

/// Per-field validity of a record, derived fresh from current values on every
/// call. Par carries no validity bound and never blocks a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidity {
    pub course_name_ok: bool,
    pub date_ok: bool,
    pub holes: Vec<HoleValidity>,
}

impl RecordValidity {
    #[must_use]
    pub fn is_save_eligible(&self) -> bool {
        self.course_name_ok && self.date_ok && self.holes.iter().all(|h| h.is_ok())
    }

    /// Count of invalid fields, for the "fix N errors" save-button message.
    #[must_use]
    pub fn error_count(&self) -> usize {
        let header = usize::from(!self.course_name_ok) + usize::from(!self.date_ok);
        let holes = self
            .holes
            .iter()
            .map(|h| usize::from(!h.score_ok) + usize::from(!h.putts_ok))
            .sum::<usize>();
        header + holes
    }
}

#[must_use]
pub fn validate(record: &ScoreRecord) -> RecordValidity {
    let holes = record
        .holes
        .iter()
        .map(|h| HoleValidity {
            score_ok: h.score.is_some_and(|s| (SCORE_MIN..=SCORE_MAX).contains(&s)),
            putts_ok: h.putts.is_some_and(|p| (PUTTS_MIN..=PUTTS_MAX).contains(&p)),
        })
        .collect();

    RecordValidity {
        course_name_ok: !record.course_name.trim().is_empty(),
        date_ok: !record.date.trim().is_empty(),
        holes,
    }
}

/// Save-eligibility gate: course and date filled, every hole's score in
/// [1,15] and putts in [0,7].
#[must_use]
pub fn is_save_eligible(record: &ScoreRecord) -> bool {
    validate(record).is_save_eligible()
}
