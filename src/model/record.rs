use serde::{Deserialize, Serialize};

/// A scorecard always carries exactly this many holes; shorter OCR replies
/// are padded and longer ones truncated at ingestion.
pub const HOLES_PER_ROUND: usize = 18;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct HoleEntry {
    /// 1-based hole number; fixed by position, never edited.
    pub number: u8,
    pub par: Option<i32>,
    /// `None` means "not yet filled", distinct from zero.
    pub score: Option<i32>,
    /// `None` means "not recorded".
    pub putts: Option<i32>,
}

impl HoleEntry {
    #[must_use]
    pub fn unfilled(number: u8) -> Self {
        Self {
            number,
            par: None,
            score: None,
            putts: None,
        }
    }
}

/// One round of golf as extracted from a scorecard image. Created only by OCR
/// parsing, mutated only through the correction editor, consumed once by the
/// score store.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreRecord {
    pub course_name: String,
    /// ISO-8601 calendar date; empty until filled in.
    pub date: String,
    /// Derived: sum of non-null hole scores (null counted as 0). Recomputed on
    /// every hole mutation, never set independently.
    pub total_score: i32,
    /// Derived sum of non-null putt counts; `None` when no hole has putt data.
    pub total_putts: Option<i32>,
    pub holes: Vec<HoleEntry>,
}

impl ScoreRecord {
    /// An all-null 18-hole record with the given header fields.
    #[must_use]
    pub fn empty(course_name: String, date: String) -> Self {
        let holes = (1..=HOLES_PER_ROUND as u8).map(HoleEntry::unfilled).collect();
        let mut record = Self {
            course_name,
            date,
            total_score: 0,
            total_putts: None,
            holes,
        };
        record.recompute_totals();
        record
    }

    /// Re-derive `total_score` and `total_putts` from the holes sequence.
    /// O(holes); run after every single-field edit.
    pub fn recompute_totals(&mut self) {
        self.total_score = self.holes.iter().filter_map(|h| h.score).sum();
        let putt_values: Vec<i32> = self.holes.iter().filter_map(|h| h.putts).collect();
        self.total_putts = if putt_values.is_empty() {
            None
        } else {
            Some(putt_values.iter().sum())
        };
    }

    /// Score sum over holes 1-9, null as 0.
    #[must_use]
    pub fn out_subtotal(&self) -> i32 {
        self.holes.iter().take(9).filter_map(|h| h.score).sum()
    }

    /// Score sum over holes 10-18, null as 0.
    #[must_use]
    pub fn in_subtotal(&self) -> i32 {
        self.holes.iter().skip(9).filter_map(|h| h.score).sum()
    }

    #[must_use]
    pub fn total_par(&self) -> i32 {
        self.holes.iter().filter_map(|h| h.par).sum()
    }

    /// Strokes over (positive) or under (negative) the card's total par.
    #[must_use]
    pub fn over_par(&self) -> i32 {
        self.total_score - self.total_par()
    }
}
