use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate, Utc, Weekday};
use anyhow::{anyhow, Result};

/// Source of "now" for the store and "today" for the view.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The calendar date the user is living in, time-of-day dropped.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant. `today` is the UTC date of that instant so
/// results don't depend on the host timezone.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

/// Whole days from `today` until `due`; negative when `due` has passed.
pub fn days_until(today: NaiveDate, due: NaiveDate) -> i64 {
    (due - today).num_days()
}

/// Strict ISO 8601 calendar date, the only form stored and sent over the wire.
pub fn parse_due_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Could not parse date: {}", input))
}

/// Accepts the ISO form plus a few shorthands typed at the terminal:
/// `today`, `tomorrow`, `+3d`, `+2w`, `+1m`, `fri`, `2:fri`.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return Err(anyhow!("Empty date string"));
    }

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return add_days(today, 1),
        "eow" => {
            // End of week (Sunday)
            let days_to_sunday = 6 - today.weekday().num_days_from_monday();
            return add_days(today, u64::from(days_to_sunday));
        }
        _ => {}
    }

    // 2. Relative format (+Nd, +Nw, +Nm)
    if let Some(rest) = input.strip_prefix('+') {
        let (split, _) = rest
            .char_indices()
            .last()
            .ok_or_else(|| anyhow!("Invalid relative format"))?;
        let (num_str, unit) = rest.split_at(split);
        if num_str.is_empty() {
            return Err(anyhow!("Invalid relative format"));
        }
        let count: u32 = num_str.parse().map_err(|_| anyhow!("Invalid relative format"))?;

        return match unit {
            "d" => add_days(today, u64::from(count)),
            "w" => add_days(today, u64::from(count) * 7),
            // Clamps to the end of a shorter month (Jan 31 + 1m -> Feb 28)
            "m" => today
                .checked_add_months(Months::new(count))
                .ok_or_else(|| anyhow!("Date out of range")),
            _ => Err(anyhow!("Unknown unit in relative time: {}", unit)),
        };
    }

    // 3. Standard format
    if let Ok(date) = parse_due_date(input) {
        return Ok(date);
    }

    // 4. Weekday format (fri, 2:fri)
    if let Some((count, day_str)) = parse_weekday_token(input) {
        if let Ok(target_weekday) = parse_weekday_str(day_str) {
            let mut days_needed = target_weekday.num_days_from_sunday() as u64
                + 7
                - today.weekday().num_days_from_sunday() as u64;
            if days_needed > 7 {
                days_needed -= 7;
            }
            // count = 1 means the next one, count = 2 the one after that
            let extra = (count - 1)
                .checked_mul(7)
                .ok_or_else(|| anyhow!("Date out of range"))?;

            return add_days(today, days_needed + extra);
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| anyhow!("Date out of range"))
}

fn parse_weekday_token(input: &str) -> Option<(u64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<u64>() {
                if count >= 1 {
                    return Some((count, parts[1]));
                }
            }
        }
    } else {
        // Just "fri" means 1:fri
        return Some((1, input));
    }
    None
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s.to_lowercase().as_str() {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // 2025-01-15 is a Wednesday
    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_weekday_token() {
        assert_eq!(parse_weekday_token("fri"), Some((1, "fri")));
        assert_eq!(parse_weekday_token("2:fri"), Some((2, "fri")));
        assert_eq!(parse_weekday_token("0:fri"), None);
        assert_eq!(parse_weekday_token("invalid"), Some((1, "invalid"))); // will fail later at weekday parse
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_human_date("today", wednesday()).unwrap(), wednesday());
        assert_eq!(parse_human_date("Tomorrow", wednesday()).unwrap(), ymd(2025, 1, 16));
        assert_eq!(parse_human_date("eow", wednesday()).unwrap(), ymd(2025, 1, 19));
    }

    #[test]
    fn test_relative() {
        assert_eq!(parse_human_date("+3d", wednesday()).unwrap(), ymd(2025, 1, 18));
        assert_eq!(parse_human_date("+2w", wednesday()).unwrap(), ymd(2025, 1, 29));
        assert_eq!(parse_human_date("+1m", ymd(2025, 1, 31)).unwrap(), ymd(2025, 2, 28));
        assert!(parse_human_date("+xd", wednesday()).is_err());
        assert!(parse_human_date("+3y", wednesday()).is_err());
    }

    #[test]
    fn test_relative_rejects_bad_units_and_overflow() {
        assert!(parse_human_date("+3é", wednesday()).is_err());
        assert!(parse_human_date("+é", wednesday()).is_err());
        assert!(parse_human_date("+d", wednesday()).is_err());
        assert!(parse_human_date("+", wednesday()).is_err());

        let err = parse_human_date("+4000000000d", wednesday()).unwrap_err();
        assert_eq!(err.to_string(), "Date out of range");
        assert!(parse_human_date("+4000000000w", wednesday()).is_err());
        assert!(parse_human_date("+4000000000m", wednesday()).is_err());
    }

    #[test]
    fn test_weekday_count_overflow() {
        let err = parse_human_date("999999999999:fri", wednesday()).unwrap_err();
        assert_eq!(err.to_string(), "Date out of range");
        assert!(parse_human_date("18446744073709551615:fri", wednesday()).is_err());
    }

    #[test]
    fn test_weekdays() {
        assert_eq!(parse_human_date("fri", wednesday()).unwrap(), ymd(2025, 1, 17));
        assert_eq!(parse_human_date("2:fri", wednesday()).unwrap(), ymd(2025, 1, 24));
        // Same weekday means next week, never today
        assert_eq!(parse_human_date("wed", wednesday()).unwrap(), ymd(2025, 1, 22));
    }

    #[test]
    fn test_iso_and_garbage() {
        assert_eq!(parse_human_date("2025-03-01", wednesday()).unwrap(), ymd(2025, 3, 1));
        assert!(parse_human_date("someday", wednesday()).is_err());
        assert!(parse_human_date("  ", wednesday()).is_err());
        assert!(parse_due_date("2025-02-30").is_err());
        assert!(parse_due_date("01/10/2025").is_err());
    }

    #[test]
    fn test_days_until() {
        assert_eq!(days_until(wednesday(), wednesday()), 0);
        assert_eq!(days_until(wednesday(), ymd(2025, 1, 18)), 3);
        assert_eq!(days_until(wednesday(), ymd(2025, 1, 14)), -1);
    }

    #[test]
    fn fixed_clock_reports_utc_date() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap());
        assert_eq!(clock.today(), wednesday());
    }
}
