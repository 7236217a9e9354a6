use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::record::{Entity, ValidationError};

/// Named date window used by dashboards, reports and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateRange {
    Today,
    Yesterday,
    #[serde(rename = "Last 7 Days")]
    Last7Days,
    #[serde(rename = "This Month")]
    ThisMonth,
    #[serde(rename = "Last Month")]
    LastMonth,
    #[default]
    #[serde(rename = "All Time")]
    AllTime,
    #[serde(rename = "Custom Range")]
    Custom { start: NaiveDate, end: NaiveDate },
}

impl DateRange {
    pub const PRESETS: [DateRange; 6] = [
        DateRange::Today,
        DateRange::Yesterday,
        DateRange::Last7Days,
        DateRange::ThisMonth,
        DateRange::LastMonth,
        DateRange::AllTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DateRange::Today => "Today",
            DateRange::Yesterday => "Yesterday",
            DateRange::Last7Days => "Last 7 Days",
            DateRange::ThisMonth => "This Month",
            DateRange::LastMonth => "Last Month",
            DateRange::AllTime => "All Time",
            DateRange::Custom { .. } => "Custom Range",
        }
    }

    /// Resolves the range against `now`. Day boundaries are midnight in
    /// `now`'s time zone.
    pub fn window<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Window {
        if *self == DateRange::AllTime {
            return Window::Unbounded;
        }
        let tz = now.timezone();
        self.days(now.date_naive())
            .and_then(|(first, last)| {
                let start = local_midnight(&tz, first)?;
                let end = local_midnight(&tz, last.succ_opt()?)?;
                Some(Window::Between { start, end })
            })
            .unwrap_or(Window::Empty)
    }

    /// First and last calendar day covered, or `None` for `AllTime` and
    /// dates out of chrono's range.
    fn days(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            DateRange::AllTime => None,
            DateRange::Today => Some((today, today)),
            DateRange::Yesterday => {
                let yesterday = today.pred_opt()?;
                Some((yesterday, yesterday))
            }
            DateRange::Last7Days => Some((today.checked_sub_days(Days::new(6))?, today)),
            DateRange::ThisMonth => Some((today.with_day(1)?, today)),
            DateRange::LastMonth => {
                let last_of_previous = today.with_day(1)?.pred_opt()?;
                Some((last_of_previous.with_day(1)?, last_of_previous))
            }
            DateRange::Custom { start, end } => Some((start.min(end), start.max(end))),
        }
    }

    pub fn contains<Tz: TimeZone>(&self, at: DateTime<Utc>, now: &DateTime<Tz>) -> bool {
        self.window(now).admits(Some(at))
    }
}

/// A [`DateRange`] resolved to instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// `AllTime`: every record passes, dated or not.
    Unbounded,
    /// Whole local days: `start <= at < end`, where `end` is the midnight
    /// after the last day.
    Between { start: DateTime<Utc>, end: DateTime<Utc> },
    /// The range could not be placed on the calendar; nothing matches.
    Empty,
}

impl Window {
    pub fn admits(&self, at: Option<DateTime<Utc>>) -> bool {
        match self {
            Window::Unbounded => true,
            Window::Between { start, end } => at.is_some_and(|at| *start <= at && at < *end),
            Window::Empty => false,
        }
    }
}

fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    first_existing(date.and_hms_opt(0, 0, 0)?, |naive| {
        tz.from_local_datetime(naive)
            .earliest()
            .map(|at| at.with_timezone(&Utc))
    })
}

/// Walks forward from `start` in quarter hours until `resolve` finds a local
/// time that exists. Clocks that spring forward at midnight skip it.
fn first_existing<F>(start: NaiveDateTime, resolve: F) -> Option<DateTime<Utc>>
where
    F: Fn(&NaiveDateTime) -> Option<DateTime<Utc>>,
{
    (0..=96).find_map(|step| {
        start
            .checked_add_signed(Duration::minutes(15 * step))
            .and_then(|naive| resolve(&naive))
    })
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRange::Custom { start, end } => write!(f, "{start}..{end}"),
            preset => f.write_str(preset.label()),
        }
    }
}

impl FromStr for DateRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Some(preset) = Self::PRESETS
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(value))
        {
            return Ok(preset);
        }

        let invalid = || ValidationError::new("range", format!("unknown date range '{value}'"));
        let (start, end) = value.split_once("..").ok_or_else(invalid)?;
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
        Ok(DateRange::Custom { start, end })
    }
}

/// Keeps records whose date falls inside `range`. Records without a date are
/// dropped by bounded ranges; `AllTime` returns the input untouched.
pub fn filter_by_date<T, Tz, F>(records: Vec<T>, range: &DateRange, now: &DateTime<Tz>, date_of: F) -> Vec<T>
where
    Tz: TimeZone,
    F: Fn(&T) -> Option<DateTime<Utc>>,
{
    let window = range.window(now);
    if window == Window::Unbounded {
        return records;
    }
    records
        .into_iter()
        .filter(|record| window.admits(date_of(record)))
        .collect()
}

/// [`filter_by_date`] on the record's creation stamp.
pub fn filter_created<T: Entity, Tz: TimeZone>(records: Vec<T>, range: &DateRange, now: &DateTime<Tz>) -> Vec<T> {
    filter_by_date(records, range, now, |record| record.created_at())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, TimeZone, Utc};

    use super::*;
    use crate::domain::entities::task::Task;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid timestamp")
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn today_spans_the_whole_local_day() {
        let now = at(2024, 3, 15, 10);
        assert_eq!(
            DateRange::Today.window(&now),
            Window::Between {
                start: at(2024, 3, 15, 0),
                end: at(2024, 3, 16, 0),
            }
        );
        assert!(DateRange::Today.contains(at(2024, 3, 15, 23), &now));
        assert!(!DateRange::Today.contains(at(2024, 3, 14, 23), &now));
    }

    #[test]
    fn last_instant_of_the_day_is_inside_and_next_midnight_is_not() {
        let now = at(2024, 3, 15, 12);
        let last_moment = Utc
            .with_ymd_and_hms(2024, 3, 15, 23, 59, 59)
            .single()
            .expect("valid timestamp")
            + Duration::nanoseconds(999_999_999);
        assert!(DateRange::Today.contains(last_moment, &now));
        assert!(DateRange::ThisMonth.contains(last_moment, &now));
        assert!(!DateRange::Today.contains(at(2024, 3, 16, 0), &now));
    }

    #[test]
    fn day_boundaries_follow_the_callers_time_zone() {
        let offset = FixedOffset::east_opt(2 * 3600).expect("valid offset");
        let now = offset
            .with_ymd_and_hms(2024, 3, 15, 1, 0, 0)
            .single()
            .expect("valid local time");
        assert_eq!(
            DateRange::Today.window(&now),
            Window::Between {
                start: at(2024, 3, 14, 22),
                end: at(2024, 3, 15, 22),
            }
        );
    }

    #[test]
    fn skipped_midnight_starts_the_day_at_the_first_existing_time() {
        let midnight = date(2024, 3, 31).and_hms_opt(0, 0, 0).expect("valid time");
        let one_am = date(2024, 3, 31).and_hms_opt(1, 0, 0).expect("valid time");
        let resolved = first_existing(midnight, |naive| (*naive >= one_am).then(|| naive.and_utc()));
        assert_eq!(resolved, Some(at(2024, 3, 31, 1)));
    }

    #[test]
    fn unresolvable_ranges_match_nothing() {
        let now = at(2024, 3, 10, 12);
        let range = DateRange::Custom {
            start: NaiveDate::MAX,
            end: NaiveDate::MAX,
        };
        assert_eq!(range.window(&now), Window::Empty);

        let mut dated = Task::default();
        dated.date_created = Some(at(2024, 3, 10, 9));
        assert!(filter_created(vec![dated], &range, &now).is_empty());
    }

    #[test]
    fn last_month_covers_the_previous_calendar_month() {
        let now = at(2024, 3, 5, 12);
        assert_eq!(
            DateRange::LastMonth.window(&now),
            Window::Between {
                start: at(2024, 2, 1, 0),
                end: at(2024, 3, 1, 0),
            }
        );
    }

    #[test]
    fn last_seven_days_includes_today_and_six_prior_days() {
        let now = at(2024, 3, 10, 12);
        assert!(DateRange::Last7Days.contains(at(2024, 3, 4, 0), &now));
        assert!(!DateRange::Last7Days.contains(at(2024, 3, 3, 23), &now));
    }

    #[test]
    fn custom_range_is_inclusive_and_order_insensitive() {
        let now = at(2024, 3, 10, 12);
        let range = DateRange::Custom {
            start: date(2024, 1, 31),
            end: date(2024, 1, 1),
        };
        assert!(range.contains(at(2024, 1, 1, 0), &now));
        assert!(range.contains(at(2024, 1, 31, 23), &now));
        assert!(!range.contains(at(2024, 2, 1, 0), &now));
    }

    #[test]
    fn all_time_passes_records_through_even_without_dates() {
        let now = at(2024, 3, 10, 12);
        let tasks = vec![Task::default(), Task::default()];
        let filtered = filter_created(tasks.clone(), &DateRange::AllTime, &now);
        assert_eq!(filtered, tasks);
    }

    #[test]
    fn bounded_ranges_drop_undated_records() {
        let now = at(2024, 3, 10, 12);
        let mut dated = Task::default();
        dated.date_created = Some(at(2024, 3, 10, 9));
        let filtered = filter_created(vec![dated.clone(), Task::default()], &DateRange::Today, &now);
        assert_eq!(filtered, vec![dated]);
    }

    #[test]
    fn labels_and_custom_ranges_parse_back() {
        assert_eq!("last 7 days".parse::<DateRange>(), Ok(DateRange::Last7Days));
        let custom = DateRange::Custom {
            start: date(2024, 1, 1),
            end: date(2024, 1, 31),
        };
        assert_eq!(custom.to_string().parse::<DateRange>(), Ok(custom));
        assert!("Someday".parse::<DateRange>().is_err());
    }

    #[test]
    fn serializes_with_display_labels() {
        let json = serde_json::to_string(&DateRange::ThisMonth).expect("serializes");
        assert_eq!(json, "\"This Month\"");
    }
}
