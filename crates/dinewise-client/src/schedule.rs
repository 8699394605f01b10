//! Merge day-of-week opening-hours rows into a fixed Monday..Sunday week.

use serde::Serialize;
use serde_json::Value;

use crate::types::OpeningHours;

/// Day names in display order, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DayHours {
    Closed,
    Open { opens: String, closes: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySchedule {
    /// Index 0 is Monday.
    pub days: [DayHours; 7],
}

impl WeeklySchedule {
    #[must_use]
    pub fn day(&self, index: usize) -> Option<&DayHours> {
        self.days.get(index)
    }

    /// Iterate `(day name, hours)` pairs Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &DayHours)> {
        WEEKDAYS.iter().copied().zip(self.days.iter())
    }
}

/// Map a backend day value to a Monday-first index.
///
/// Accepts full or three-letter English names in any case, or a number where
/// 0 is Sunday and 6 is Saturday (the backend's `DayOfWeek` numbering). A
/// numeric string is treated like the number.
#[must_use]
pub fn parse_weekday(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n.as_u64().and_then(sunday_first_to_index),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(n) = s.parse::<u64>() {
                return sunday_first_to_index(n);
            }
            let lower = s.to_ascii_lowercase();
            WEEKDAYS.iter().position(|day| {
                let day = day.to_ascii_lowercase();
                lower == day || (lower.len() == 3 && day.starts_with(&lower))
            })
        }
        _ => None,
    }
}

fn sunday_first_to_index(n: u64) -> Option<usize> {
    match n {
        0 => Some(6),
        1..=6 => usize::try_from(n - 1).ok(),
        _ => None,
    }
}

/// Build a full week from `rows`.
///
/// Days with no row are closed. A row flagged closed, or missing either time,
/// closes its day. When a day appears more than once the last row wins. Rows
/// whose day cannot be parsed are skipped.
#[must_use]
pub fn weekly_schedule(rows: &[OpeningHours]) -> WeeklySchedule {
    let mut days: [DayHours; 7] = std::array::from_fn(|_| DayHours::Closed);
    for row in rows {
        let Some(index) = parse_weekday(&row.day_of_week) else {
            tracing::debug!(day = %row.day_of_week, "skipping hours row with unknown day");
            continue;
        };
        days[index] = match (&row.open_time, &row.close_time, row.is_closed) {
            (Some(open), Some(close), false) => DayHours::Open {
                opens: open.clone(),
                closes: close.clone(),
            },
            _ => DayHours::Closed,
        };
    }
    WeeklySchedule { days }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(day: Value, open: Option<&str>, close: Option<&str>, closed: bool) -> OpeningHours {
        OpeningHours {
            day_of_week: day,
            open_time: open.map(str::to_string),
            close_time: close.map(str::to_string),
            is_closed: closed,
        }
    }

    fn open(opens: &str, closes: &str) -> DayHours {
        DayHours::Open {
            opens: opens.to_string(),
            closes: closes.to_string(),
        }
    }

    #[test]
    fn parse_weekday_names_and_numbers() {
        assert_eq!(parse_weekday(&json!("Monday")), Some(0));
        assert_eq!(parse_weekday(&json!("sun")), Some(6));
        assert_eq!(parse_weekday(&json!("FRIDAY")), Some(4));
        assert_eq!(parse_weekday(&json!(0)), Some(6));
        assert_eq!(parse_weekday(&json!(1)), Some(0));
        assert_eq!(parse_weekday(&json!("6")), Some(5));
        assert_eq!(parse_weekday(&json!(7)), None);
        assert_eq!(parse_weekday(&json!("someday")), None);
        assert_eq!(parse_weekday(&json!("mo")), None);
        assert_eq!(parse_weekday(&Value::Null), None);
    }

    #[test]
    fn missing_days_are_closed() {
        let week = weekly_schedule(&[row(json!("Tuesday"), Some("10:00"), Some("22:00"), false)]);
        assert_eq!(week.days[0], DayHours::Closed);
        assert_eq!(week.days[1], open("10:00", "22:00"));
        assert!(week.days[2..].iter().all(|d| *d == DayHours::Closed));
    }

    #[test]
    fn closed_flag_and_missing_times_close_the_day() {
        let week = weekly_schedule(&[
            row(json!(1), Some("09:00"), Some("17:00"), true),
            row(json!(2), Some("09:00"), None, false),
        ]);
        assert_eq!(week.days[0], DayHours::Closed);
        assert_eq!(week.days[1], DayHours::Closed);
    }

    #[test]
    fn last_row_for_a_day_wins() {
        let week = weekly_schedule(&[
            row(json!("Saturday"), Some("12:00"), Some("23:00"), false),
            row(json!("sat"), Some("14:00"), Some("02:00"), false),
        ]);
        assert_eq!(week.days[5], open("14:00", "02:00"));
    }

    #[test]
    fn unknown_days_are_skipped() {
        let week = weekly_schedule(&[row(json!("holiday"), Some("10:00"), Some("12:00"), false)]);
        assert!(week.days.iter().all(|d| *d == DayHours::Closed));
    }

    #[test]
    fn iter_yields_monday_first() {
        let week = weekly_schedule(&[row(json!(0), Some("11:00"), Some("15:00"), false)]);
        let pairs: Vec<_> = week.iter().collect();
        assert_eq!(pairs[0].0, "Monday");
        assert_eq!(pairs[6], ("Sunday", &open("11:00", "15:00")));
        assert_eq!(week.day(7), None);
    }
}
