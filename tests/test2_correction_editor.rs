use cardcaddy::controller::editor::{HoleField, set_course_name, set_date, set_hole_field};
use cardcaddy::model::{is_save_eligible, validate};

mod common;

#[test]
fn numeric_input_updates_field_and_totals() {
    let mut record = common::filled_record();
    assert_eq!(record.total_score, 90);

    assert!(set_hole_field(&mut record, 0, HoleField::Score, "7"));
    assert_eq!(record.holes[0].score, Some(7));
    assert_eq!(record.total_score, 92);

    // Leading zeros parse like the form input they come from.
    assert!(set_hole_field(&mut record, 1, HoleField::Putts, "03"));
    assert_eq!(record.holes[1].putts, Some(3));
    assert_eq!(record.total_putts, Some(37));
}

// Scenario: clearing hole 6's score drops the total by that score and makes
// a previously eligible record save-blocked.
#[test]
fn empty_input_clears_to_null_and_blocks_save() {
    let mut record = common::filled_record();
    assert!(is_save_eligible(&record));
    let before = record.total_score;

    assert!(set_hole_field(&mut record, 5, HoleField::Score, ""));
    assert_eq!(record.holes[5].score, None);
    assert_eq!(record.total_score, before - 5);
    assert!(!is_save_eligible(&record));
}

#[test]
fn non_numeric_input_leaves_field_unchanged() {
    let mut record = common::filled_record();
    assert!(!set_hole_field(&mut record, 3, HoleField::Score, "abc"));
    assert_eq!(record.holes[3].score, Some(5));
    assert_eq!(record.total_score, 90);
}

#[test]
fn out_of_range_index_is_rejected_without_panic() {
    let mut record = common::filled_record();
    assert!(!set_hole_field(&mut record, 18, HoleField::Score, "4"));
    assert_eq!(record.total_score, 90);
}

#[test]
fn par_is_editable_and_never_blocks_save() {
    let mut record = common::filled_record();
    assert!(set_hole_field(&mut record, 0, HoleField::Par, ""));
    assert_eq!(record.holes[0].par, None);
    assert!(is_save_eligible(&record));
}

#[test]
fn header_fields_replace_verbatim() {
    let mut record = common::filled_record();
    set_course_name(&mut record, "");
    set_date(&mut record, "2024-07-04");
    assert_eq!(record.course_name, "");
    assert_eq!(record.date, "2024-07-04");
    assert!(!is_save_eligible(&record));

    set_course_name(&mut record, "St Andrews");
    assert!(is_save_eligible(&record));
}

#[test]
fn validity_is_derived_fresh_on_every_read() {
    let mut record = common::filled_record();
    assert!(validate(&record).is_save_eligible());

    set_hole_field(&mut record, 9, HoleField::Putts, "9");
    let validity = validate(&record);
    assert!(!validity.holes[9].putts_ok);
    assert_eq!(validity.error_count(), 1);

    set_hole_field(&mut record, 9, HoleField::Putts, "2");
    assert!(validate(&record).is_save_eligible());
}

#[test]
fn score_and_putt_ranges_bound_eligibility() {
    let mut record = common::filled_record();
    set_hole_field(&mut record, 0, HoleField::Score, "16");
    assert!(!is_save_eligible(&record));
    set_hole_field(&mut record, 0, HoleField::Score, "15");
    assert!(is_save_eligible(&record));
    set_hole_field(&mut record, 0, HoleField::Score, "0");
    assert!(!is_save_eligible(&record));
    set_hole_field(&mut record, 0, HoleField::Score, "1");
    assert!(is_save_eligible(&record));

    set_hole_field(&mut record, 0, HoleField::Putts, "8");
    assert!(!is_save_eligible(&record));
    set_hole_field(&mut record, 0, HoleField::Putts, "0");
    assert!(is_save_eligible(&record));
}

#[test]
fn subtotals_follow_out_and_in_split() {
    let mut record = common::filled_record();
    assert_eq!(record.out_subtotal(), 45);
    assert_eq!(record.in_subtotal(), 45);

    set_hole_field(&mut record, 0, HoleField::Score, "9");
    assert_eq!(record.out_subtotal(), 49);
    assert_eq!(record.in_subtotal(), 45);
    assert_eq!(record.over_par(), record.total_score - record.total_par());
}
