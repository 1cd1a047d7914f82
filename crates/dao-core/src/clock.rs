use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc, Weekday};

/// A single observation of "now": the UTC instant used for timestamps and the
/// user's local calendar date used for day-based accounting.
///
/// Every time-dependent transition takes a `Moment` instead of reading the
/// system clock, so the whole engine can be driven from a fixed point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    pub now: DateTime<Utc>,
    pub today: NaiveDate,
}

impl Moment {
    /// The current instant, with the date taken from the local timezone.
    pub fn now() -> Self {
        Self::from_local(Local::now())
    }

    pub fn from_local<Tz: TimeZone>(at: DateTime<Tz>) -> Self {
        Self {
            now: at.with_timezone(&Utc),
            today: at.date_naive(),
        }
    }

    /// Noon UTC on `date`, with `today` pinned to that date.
    pub fn on(date: NaiveDate) -> Self {
        let now = date
            .and_hms_opt(12, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or_default();
        Self { now, today: date }
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self {
            now: self.now + Duration::days(days),
            today: self.today + Duration::days(days),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.today.weekday()
    }

    pub fn is_monday(&self) -> bool {
        self.weekday() == Weekday::Mon
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.today - Duration::days(1)
    }

    /// ISO `YYYY-MM-DD` form of the local date.
    pub fn today_iso(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    /// Whole days elapsed since `since`, rounded up. A partial day counts as
    /// a full one; zero or negative spans return 0.
    pub fn days_since(&self, since: DateTime<Utc>) -> i64 {
        let millis = (self.now - since).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        let day = Duration::days(1).num_milliseconds();
        (millis + day - 1) / day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn on_pins_local_date() {
        let m = Moment::on(date(2026, 3, 2));
        assert_eq!(m.today_iso(), "2026-03-02");
        assert!(m.is_monday());
    }

    #[test]
    fn plus_days_moves_both_fields() {
        let m = Moment::on(date(2026, 3, 2)).plus_days(8);
        assert_eq!(m.today, date(2026, 3, 10));
        assert_eq!(m.weekday(), Weekday::Tue);
    }

    #[test]
    fn days_since_rounds_up() {
        let start = Moment::on(date(2026, 3, 2));
        let later = Moment {
            now: start.now + Duration::hours(7 * 24 + 1),
            today: date(2026, 3, 9),
        };
        assert_eq!(later.days_since(start.now), 8);
        assert_eq!(start.days_since(start.now), 0);
        assert_eq!(start.plus_days(7).days_since(start.now), 7);
    }
}
