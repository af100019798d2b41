//! Period-based completion rates.
//!
//! Daily checklists, weekly objectives and session attendance are reduced to
//! a fraction of the requested period. Completion rows are sparse: a missing
//! row means "not completed", and a row with `completed = false` counts the
//! same way.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::calendar::{resolve_period, week_starts_between};
use super::verse_set::percentage;
use crate::models::{
    AttendanceRate, AttendanceRecord, DailyCompletion, DayRate, ObjectiveCompletion, Period,
    PeriodKind, Program, RateReport, WeekRate,
};

/// The completion rows a rate is computed from.
///
/// Rows of other owners may be present; they are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionRows<'a> {
    /// Daily checklist rows.
    pub daily: &'a [DailyCompletion],
    /// Weekly objective rows, anchored on Sundays.
    pub objectives: &'a [ObjectiveCompletion],
    /// Weekly attendance sheets, anchored on Sundays.
    pub attendance: &'a [AttendanceRecord],
}

/// Returns the exclusive end actually used for counting.
///
/// A period reaching past `today` is cut so that today still counts and later
/// days do not; a period starting after `today` collapses to zero length.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::{effective_end, resolve_period};
/// use hifz_engine::models::PeriodKind;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
/// let year = resolve_period(PeriodKind::Year, today);
/// assert_eq!(effective_end(&year, today), NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
///
/// let past = resolve_period(PeriodKind::Year, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// assert_eq!(effective_end(&past, today), past.end);
/// ```
pub fn effective_end(period: &Period, today: NaiveDate) -> NaiveDate {
    let tomorrow = today.succ_opt().unwrap_or(today);
    period.end.min(tomorrow).max(period.start)
}

/// Computes completion rates of one owner over the period of `kind` containing
/// `anchor`.
///
/// # Arguments
///
/// * `owner_id` - The student whose rows are counted
/// * `kind` - Week, month or year
/// * `anchor` - Any date inside the requested period
/// * `today` - The current date; later days of the period are not counted
/// * `programs` - Programs to report daily rates for
/// * `objectives` - Objective codes to report weekly rates for
/// * `rows` - The completion rows
///
/// # Returns
///
/// A [`RateReport`] with one [`DayRate`] per program, one [`WeekRate`] per
/// objective and the attendance rate. An empty or future period yields zero
/// totals and zero percentages.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::{compute_rate, CompletionRows};
/// use hifz_engine::models::{DailyCompletion, PeriodKind, Program};
/// use chrono::NaiveDate;
///
/// let day = |d| NaiveDate::from_ymd_opt(2026, 1, d).unwrap();
/// let daily: Vec<DailyCompletion> = [11, 13, 15]
///     .into_iter()
///     .map(|d| DailyCompletion {
///         owner_id: "u1".to_string(),
///         program: Program::Memorization,
///         date: day(d),
///         completed: true,
///     })
///     .collect();
///
/// let report = compute_rate(
///     "u1",
///     PeriodKind::Week,
///     day(14),
///     day(31),
///     &[Program::Memorization],
///     &[],
///     &CompletionRows { daily: &daily, ..Default::default() },
/// );
///
/// let rate = report.per_program[&Program::Memorization];
/// assert_eq!((rate.completed_days, rate.total_days, rate.percentage), (3, 7, 43));
/// ```
pub fn compute_rate(
    owner_id: &str,
    kind: PeriodKind,
    anchor: NaiveDate,
    today: NaiveDate,
    programs: &[Program],
    objectives: &[String],
    rows: &CompletionRows<'_>,
) -> RateReport {
    let period = resolve_period(kind, anchor);
    let end = effective_end(&period, today);
    let in_range = |date: NaiveDate| date >= period.start && date < end;

    let total_days = u32::try_from((end - period.start).num_days()).unwrap_or(0);
    let per_program = programs
        .iter()
        .map(|&program| {
            let completed: BTreeSet<NaiveDate> = rows
                .daily
                .iter()
                .filter(|row| row.owner_id == owner_id && row.program == program)
                .filter(|row| row.completed && in_range(row.date))
                .map(|row| row.date)
                .collect();
            let completed_days = completed.len() as u32;
            let rate = DayRate {
                completed_days,
                total_days,
                percentage: percentage(completed_days, total_days),
            };
            (program, rate)
        })
        .collect();

    let total_weeks = week_starts_between(period.start, end).len() as u32;
    let per_objective = objectives
        .iter()
        .map(|objective| {
            let completed: BTreeSet<NaiveDate> = rows
                .objectives
                .iter()
                .filter(|row| row.owner_id == owner_id && &row.objective == objective)
                .filter(|row| row.completed && in_range(row.week_start))
                .map(|row| row.week_start)
                .collect();
            let completed_weeks = completed.len() as u32;
            let rate = WeekRate {
                completed_weeks,
                total_weeks,
                percentage: percentage(completed_weeks, total_weeks),
            };
            (objective.clone(), rate)
        })
        .collect();

    let attendance = attendance_rate(owner_id, rows.attendance, in_range);

    RateReport {
        owner_id: owner_id.to_string(),
        period,
        effective_end: end,
        per_program,
        per_objective,
        attendance,
    }
}

fn attendance_rate(
    owner_id: &str,
    records: &[AttendanceRecord],
    in_range: impl Fn(NaiveDate) -> bool,
) -> AttendanceRate {
    // a day marked on two sheets keeps its last mark
    let sessions: BTreeMap<NaiveDate, bool> = records
        .iter()
        .filter(|record| record.owner_id == owner_id)
        .flat_map(|record| record.marked_days())
        .filter(|(date, _)| in_range(*date))
        .collect();

    let session_days = sessions.len() as u32;
    let present_days = sessions.values().filter(|present| **present).count() as u32;
    AttendanceRate {
        present_days,
        session_days,
        percentage: percentage(present_days, session_days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(owner: &str, program: Program, day: NaiveDate, completed: bool) -> DailyCompletion {
        DailyCompletion {
            owner_id: owner.to_string(),
            program,
            date: day,
            completed,
        }
    }

    fn objective(code: &str, week_start: NaiveDate) -> ObjectiveCompletion {
        ObjectiveCompletion {
            owner_id: "u1".to_string(),
            objective: code.to_string(),
            week_start,
            completed: true,
        }
    }

    // ==========================================================================
    // RATE-001: 3 of 7 days gives 43%
    // ==========================================================================
    #[test]
    fn test_rate_001_three_of_seven_days() {
        let rows = vec![
            daily("u1", Program::Memorization, date(2026, 1, 11), true),
            daily("u1", Program::Memorization, date(2026, 1, 12), true),
            daily("u1", Program::Memorization, date(2026, 1, 17), true),
        ];
        let report = compute_rate(
            "u1",
            PeriodKind::Week,
            date(2026, 1, 14),
            date(2026, 2, 1),
            &[Program::Memorization, Program::Revision],
            &[],
            &CompletionRows {
                daily: &rows,
                ..Default::default()
            },
        );

        assert_eq!(
            report.per_program[&Program::Memorization],
            DayRate {
                completed_days: 3,
                total_days: 7,
                percentage: 43
            }
        );
        assert_eq!(report.per_program[&Program::Revision].completed_days, 0);
    }

    // ==========================================================================
    // RATE-002: The current year counts elapsed days, not 365
    // ==========================================================================
    #[test]
    fn test_rate_002_current_year_is_clamped() {
        let today = date(2026, 10, 17);
        let report = compute_rate(
            "u1",
            PeriodKind::Year,
            today,
            today,
            &[Program::Reading],
            &[],
            &CompletionRows::default(),
        );
        assert_eq!(report.period.day_count(), 365);
        assert_eq!(report.per_program[&Program::Reading].total_days, 290);
        assert_eq!(report.effective_end, date(2026, 10, 18));
    }

    // ==========================================================================
    // RATE-003: A future period has zero totals
    // ==========================================================================
    #[test]
    fn test_rate_003_future_period_is_zero() {
        let rows = vec![daily("u1", Program::Reading, date(2027, 3, 3), true)];
        let report = compute_rate(
            "u1",
            PeriodKind::Month,
            date(2027, 3, 1),
            date(2026, 10, 17),
            &[Program::Reading],
            &["peer_recitation".to_string()],
            &CompletionRows {
                daily: &rows,
                ..Default::default()
            },
        );
        let rate = report.per_program[&Program::Reading];
        assert_eq!((rate.completed_days, rate.total_days, rate.percentage), (0, 0, 0));
        assert_eq!(report.per_objective["peer_recitation"].total_weeks, 0);
        assert_eq!(report.attendance.percentage, 0);
    }

    // ==========================================================================
    // RATE-004: Sparse rows
    // ==========================================================================
    #[test]
    fn test_rate_004_unchecked_and_foreign_rows_do_not_count() {
        let rows = vec![
            daily("u1", Program::Revision, date(2026, 1, 11), true),
            daily("u1", Program::Revision, date(2026, 1, 11), true),
            daily("u1", Program::Revision, date(2026, 1, 12), false),
            daily("u2", Program::Revision, date(2026, 1, 13), true),
            daily("u1", Program::Revision, date(2026, 1, 18), true),
        ];
        let report = compute_rate(
            "u1",
            PeriodKind::Week,
            date(2026, 1, 11),
            date(2026, 2, 1),
            &[Program::Revision],
            &[],
            &CompletionRows {
                daily: &rows,
                ..Default::default()
            },
        );
        assert_eq!(report.per_program[&Program::Revision].completed_days, 1);
        assert_eq!(report.per_program[&Program::Revision].percentage, 14);
    }

    // ==========================================================================
    // RATE-005: Objectives count distinct weeks starting in the period
    // ==========================================================================
    #[test]
    fn test_rate_005_objective_weeks_in_month() {
        // February 2026 has Sundays on the 1st, 8th, 15th and 22nd
        let rows = vec![
            objective("peer_recitation", date(2026, 2, 1)),
            objective("peer_recitation", date(2026, 2, 15)),
            objective("peer_recitation", date(2026, 2, 15)),
            objective("peer_recitation", date(2026, 1, 25)),
            objective("tafsir_reading", date(2026, 2, 8)),
        ];
        let report = compute_rate(
            "u1",
            PeriodKind::Month,
            date(2026, 2, 10),
            date(2026, 6, 1),
            &[],
            &["peer_recitation".to_string()],
            &CompletionRows {
                objectives: &rows,
                ..Default::default()
            },
        );
        assert_eq!(
            report.per_objective["peer_recitation"],
            WeekRate {
                completed_weeks: 2,
                total_weeks: 4,
                percentage: 50
            }
        );
        assert!(!report.per_objective.contains_key("tafsir_reading"));
    }

    // ==========================================================================
    // RATE-006: Attendance counts present days over session days
    // ==========================================================================
    #[test]
    fn test_rate_006_attendance() {
        let sheets = vec![
            AttendanceRecord {
                owner_id: "u1".to_string(),
                week_start: date(2026, 1, 4),
                days: [Some(2), None, None, Some(0), None, None, Some(1)],
            },
            AttendanceRecord {
                owner_id: "u1".to_string(),
                week_start: date(2026, 1, 11),
                days: [Some(3), None, None, Some(3), None, None, None],
            },
        ];
        let report = compute_rate(
            "u1",
            PeriodKind::Month,
            date(2026, 1, 20),
            date(2026, 3, 1),
            &[],
            &[],
            &CompletionRows {
                attendance: &sheets,
                ..Default::default()
            },
        );
        assert_eq!(
            report.attendance,
            AttendanceRate {
                present_days: 4,
                session_days: 5,
                percentage: 80
            }
        );
    }

    #[test]
    fn test_rate_at_last_representable_date() {
        let report = compute_rate(
            "u1",
            PeriodKind::Year,
            NaiveDate::MAX,
            NaiveDate::MAX,
            &[Program::Reading],
            &["peer_recitation".to_string()],
            &CompletionRows::default(),
        );
        assert_eq!(report.effective_end, NaiveDate::MAX);
        assert_eq!(report.per_program[&Program::Reading].completed_days, 0);
    }

    #[test]
    fn test_current_week_counts_up_to_today() {
        let rows = vec![
            daily("u1", Program::Memorization, date(2026, 10, 12), true),
            daily("u1", Program::Memorization, date(2026, 10, 15), true),
        ];
        let report = compute_rate(
            "u1",
            PeriodKind::Week,
            date(2026, 10, 14),
            date(2026, 10, 14),
            &[Program::Memorization],
            &[],
            &CompletionRows {
                daily: &rows,
                ..Default::default()
            },
        );
        let rate = report.per_program[&Program::Memorization];
        assert_eq!((rate.completed_days, rate.total_days), (1, 4));
        assert_eq!(rate.percentage, 25);
    }

    #[test]
    fn test_effective_end_of_future_period_is_its_start() {
        let period = resolve_period(PeriodKind::Week, date(2026, 12, 2));
        assert_eq!(effective_end(&period, date(2026, 10, 17)), period.start);
    }
}
