//! Week numbering and period arithmetic.
//!
//! Two week conventions coexist in the data: the Sunday-start "local week"
//! used by sessions and attendance, and ISO-8601 weeks found on some legacy
//! records. Both are computed here as independent functions and every week
//! identifier carries its [`WeekConvention`]; nothing in the engine converts
//! one into the other implicitly.
//!
//! The arithmetic here never panics. Results that would fall outside
//! chrono's representable range saturate at [`NaiveDate::MIN`] or
//! [`NaiveDate::MAX`]; callers taking dates from outside the process check
//! them with [`validate_date`](super::validate_date) first.

use chrono::{Datelike, Days, Duration, Months, NaiveDate, Weekday};

use crate::models::{Period, PeriodKind, WeekConvention, WeekId};

/// Returns the Sunday on or before `date`.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::local_week_start;
/// use chrono::NaiveDate;
///
/// // 2026-01-14 is a Wednesday
/// let wednesday = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
/// assert_eq!(local_week_start(wednesday), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
///
/// // A Sunday is its own week start
/// let sunday = NaiveDate::from_ymd_opt(2026, 1, 11).unwrap();
/// assert_eq!(local_week_start(sunday), sunday);
/// ```
pub fn local_week_start(date: NaiveDate) -> NaiveDate {
    let offset = Days::new(u64::from(date.weekday().num_days_from_sunday()));
    date.checked_sub_days(offset).unwrap_or(NaiveDate::MIN)
}

/// Returns the local week number of `date`.
///
/// The week is numbered within the series of the year its Sunday falls in,
/// so early-January dates whose Sunday is in December get the last week
/// number of the previous year. See [`local_week_id`] for the year.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::local_week_number;
/// use chrono::NaiveDate;
///
/// // Thursday 2026-01-01 belongs to the week of Sunday 2025-12-28
/// let new_year = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// assert_eq!(local_week_number(new_year), 53);
///
/// let second_week = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
/// assert_eq!(local_week_number(second_week), 2);
/// ```
pub fn local_week_number(date: NaiveDate) -> u32 {
    local_week_id(date).week
}

/// Returns the local week of `date` with its derived year.
///
/// The derived year is the calendar year of the week's Sunday. The week
/// number counts weeks from the local week containing January 1 of that
/// year, starting at 1. Numbers run up to 53, or 54 in a leap year starting
/// on a Saturday.
pub fn local_week_id(date: NaiveDate) -> WeekId {
    let start = local_week_start(date);
    let january_first = start.with_ordinal(1).unwrap_or(start);
    let first_sunday = local_week_start(january_first);
    let weeks = (start - first_sunday).num_days() / 7;
    WeekId::local(start.year(), weeks as u32 + 1)
}

/// Returns the Sunday starting local week `week` of `year`.
///
/// Week 1 starts on the Sunday on or before January 1, so for most years
/// week 1 of `year` is the same week as the last week of `year - 1`.
/// Week numbers of 0 or above 54 are outside the contract and are not
/// checked.
///
/// Years outside chrono's range, and weeks running past it, saturate at
/// [`NaiveDate::MIN`] or [`NaiveDate::MAX`]. Use [`week_start_date`] to
/// detect that case instead.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::{local_week_number, sunday_of_week};
/// use chrono::{Datelike, NaiveDate, Weekday};
///
/// let sunday = sunday_of_week(2026, 10);
/// assert_eq!(sunday, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
/// assert_eq!(sunday.weekday(), Weekday::Sun);
/// assert_eq!(local_week_number(sunday), 10);
/// ```
pub fn sunday_of_week(year: i32, week: u32) -> NaiveDate {
    week_start_date(&WeekId::local(year, week)).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// Returns the ISO-8601 week number of `date`.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::iso_week_number;
/// use chrono::NaiveDate;
///
/// // Monday 2025-12-29 is in ISO week 1 of 2026
/// assert_eq!(iso_week_number(NaiveDate::from_ymd_opt(2025, 12, 29).unwrap()), 1);
/// ```
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Returns the ISO week of `date` with its ISO week-based year.
pub fn iso_week_id(date: NaiveDate) -> WeekId {
    let iso = date.iso_week();
    WeekId::iso(iso.year(), iso.week())
}

/// Returns the first day of a tagged week: the Sunday for local weeks, the
/// Monday for ISO weeks.
///
/// Returns `None` when the week is not representable or the ISO week does
/// not exist in that year.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::week_start_date;
/// use hifz_engine::models::WeekId;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     week_start_date(&WeekId::local(2025, 53)),
///     NaiveDate::from_ymd_opt(2025, 12, 28)
/// );
/// assert_eq!(
///     week_start_date(&WeekId::iso(2026, 1)),
///     NaiveDate::from_ymd_opt(2025, 12, 29)
/// );
/// assert_eq!(week_start_date(&WeekId::iso(2025, 53)), None);
/// ```
pub fn week_start_date(week: &WeekId) -> Option<NaiveDate> {
    match week.convention {
        WeekConvention::Local => {
            let january_first = NaiveDate::from_ymd_opt(week.year, 1, 1)?;
            let offset = Days::new(u64::from(january_first.weekday().num_days_from_sunday()));
            let week_one = january_first.checked_sub_days(offset)?;
            week_one.checked_add_signed(Duration::weeks(i64::from(week.week) - 1))
        }
        WeekConvention::Iso => NaiveDate::from_isoywd_opt(week.year, week.week, Weekday::Mon),
    }
}

/// Maps a week anchor written under the historical Monday convention to the
/// local-week Sunday.
///
/// Intended for the one-time migration of Monday-anchored rows; the rate
/// aggregator itself rejects non-Sunday anchors.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::normalize_week_anchor;
/// use chrono::NaiveDate;
///
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(normalize_week_anchor(monday), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
/// ```
pub fn normalize_week_anchor(anchor: NaiveDate) -> NaiveDate {
    local_week_start(anchor)
}

/// Resolves the half-open period of `kind` containing `anchor`.
///
/// Weeks are local (Sunday-start) weeks; months and years are calendar
/// months and years. A period whose end is not representable ends at
/// [`NaiveDate::MAX`].
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::resolve_period;
/// use hifz_engine::models::PeriodKind;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
/// let month = resolve_period(PeriodKind::Month, anchor);
/// assert_eq!(month.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(month.end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(month.day_count(), 29);
/// ```
pub fn resolve_period(kind: PeriodKind, anchor: NaiveDate) -> Period {
    let (start, end) = match kind {
        PeriodKind::Week => {
            let start = local_week_start(anchor);
            (start, start.checked_add_days(Days::new(7)))
        }
        PeriodKind::Month => {
            let start = anchor.with_day(1).unwrap_or(anchor);
            (start, start.checked_add_months(Months::new(1)))
        }
        PeriodKind::Year => {
            let start = anchor.with_ordinal(1).unwrap_or(anchor);
            (start, start.checked_add_months(Months::new(12)))
        }
    };
    Period {
        kind,
        start,
        end: end.unwrap_or(NaiveDate::MAX),
    }
}

/// Returns the number of days in the period of `kind` containing `reference`.
///
/// 7 for a week, 28-31 for a month, 365 or 366 for a year.
///
/// # Example
///
/// ```
/// use hifz_engine::calculation::period_day_count;
/// use hifz_engine::models::PeriodKind;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
/// assert_eq!(period_day_count(PeriodKind::Week, date), 7);
/// assert_eq!(period_day_count(PeriodKind::Month, date), 30);
/// assert_eq!(period_day_count(PeriodKind::Year, date), 365);
/// ```
pub fn period_day_count(kind: PeriodKind, reference: NaiveDate) -> u32 {
    resolve_period(kind, reference).day_count()
}

/// Lists the local-week Sundays in `[start, end)`.
pub fn week_starts_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let week_start = local_week_start(start);
    let mut next = if week_start < start {
        week_start.checked_add_days(Days::new(7))
    } else {
        Some(week_start)
    };

    let mut sundays = Vec::new();
    while let Some(sunday) = next.filter(|sunday| *sunday < end) {
        sundays.push(sunday);
        next = sunday.checked_add_days(Days::new(7));
    }
    sundays
}
