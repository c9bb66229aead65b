use maud::{Markup, html};

use crate::model::{RecordValidity, ScoreRecord, validate};

fn cell_class(ok: bool) -> &'static str {
    if ok { "cell" } else { "cell field-error" }
}

fn header_class(ok: bool) -> &'static str {
    if ok { "field" } else { "field field-error" }
}

/// The check-and-correct screen: header fields, OUT and IN hole tables with
/// per-field error highlighting, derived totals and the save gate.
#[must_use]
pub fn render_correction_template(record: &ScoreRecord) -> Markup {
    let validity = validate(record);
    html! {
        div class="correction" {
            div class="correction-header" {
                h2 { "CHECK & CORRECT" }
                div class="total" { "TOTAL: " span class="total-value" { (record.total_score) } }
            }
            div class="record-fields" {
                label { "DATE" }
                input type="date" name="date" value=(record.date)
                    class=(header_class(validity.date_ok));
                label { "COURSE" }
                input type="text" name="course_name" value=(record.course_name)
                    placeholder="Course name"
                    class=(header_class(validity.course_name_ok));
            }
            (render_nine(record, &validity, 0, "OUT (1-9)", record.out_subtotal()))
            (render_nine(record, &validity, 9, "IN (10-18)", record.in_subtotal()))
            div class="grand-total" {
                span { "Total Score" }
                span class="total-value" { (record.total_score) }
                @let over = record.over_par();
                p class="over-par" {
                    @if over > 0 { (format!("+{over} over par")) } @else { (format!("{over} over par")) }
                }
            }
            (render_save_button(&validity))
        }
    }
}

fn render_nine(
    record: &ScoreRecord,
    validity: &RecordValidity,
    start: usize,
    heading: &str,
    subtotal: i32,
) -> Markup {
    html! {
        div class="nine" {
            h3 { (heading) }
            table class="holes" {
                tr { th { "H" } th { "PAR" } th { "SCORE" } th { "PUTT" } }
                @for (i, hole) in record.holes.iter().enumerate().skip(start).take(9) {
                    @let hv = validity.holes.get(i);
                    tr {
                        td class="hole-number" { (hole.number) }
                        td class="cell" {
                            input type="number" name=(format!("par-{}", hole.number))
                                value=[hole.par];
                        }
                        td class=(cell_class(hv.is_none_or(|v| v.score_ok))) {
                            input type="number" name=(format!("score-{}", hole.number))
                                value=[hole.score];
                        }
                        td class=(cell_class(hv.is_none_or(|v| v.putts_ok))) {
                            input type="number" name=(format!("putts-{}", hole.number))
                                placeholder="-" value=[hole.putts];
                        }
                    }
                }
                tr class="subtotal" {
                    td colspan="3" { (heading) " Total" }
                    td { (subtotal) }
                }
            }
        }
    }
}

fn render_save_button(validity: &RecordValidity) -> Markup {
    let eligible = validity.is_save_eligible();
    html! {
        @if eligible {
            button id="save-btn" class="save" { "CONFIRM & SAVE" }
        } @else {
            button id="save-btn" class="save save-blocked" disabled {
                (format!("PLEASE FIX {} ERRORS", validity.error_count()))
            }
        }
    }
}
