pub mod client;
pub mod parse;

pub use client::*;
pub use parse::*;

/// Fixed extraction instruction sent with every scorecard image.
pub const EXTRACTION_PROMPT: &str = r#"Read this golf scorecard image and output only JSON, no commentary.

Requirements:
- Extract the course name, the round date (YYYY-MM-DD), and for every hole 1 through 18 the par, the score, and the putt count.
- Any numeric field that is illegible or absent must be null. Never omit a field and never guess a value.
- On a two-sided card, the OUT column is holes 1-9 and the IN column is holes 10-18.
- The holes array must contain exactly 18 entries; if the card shows fewer, pad with null-valued holes.
- JSON format:
{
  "course_name": "Pine Valley",
  "date": "2024-05-01",
  "total_score": 85,
  "total_putts": 30,
  "holes": [
    { "number": 1, "par": 4, "score": 5, "putts": 2 },
    ...
    { "number": 18, "par": 4, "score": 6, "putts": 1 }
  ]
}
"#;
