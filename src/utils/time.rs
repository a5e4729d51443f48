use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Signed count of business days from `from` to `to`, weekends excluded.
/// Counts the days in the half-open interval (`from`, `to`], so
/// `business_days_between(d, d) == 0` and a deadline falling on the next
/// weekday yields 1. Holidays are not considered.
pub fn business_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if from == to {
        return 0;
    }
    let (start, end, sign) = if from < to {
        (from, to, 1)
    } else {
        (to, from, -1)
    };

    let mut days = 0i64;
    let mut cursor = start + Duration::days(1);
    while cursor <= end {
        if is_business_day(cursor) {
            days += 1;
        }
        cursor += Duration::days(1);
    }
    days * sign
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_is_zero() {
        let d = date(2026, 8, 5);
        assert_eq!(business_days_between(d, d), 0);
    }

    #[test]
    fn skips_weekends_forward() {
        // Friday -> next Monday is a single business day.
        let friday = date(2026, 8, 7);
        let monday = date(2026, 8, 10);
        assert_eq!(business_days_between(friday, monday), 1);

        // Monday -> Friday same week.
        let mon = date(2026, 8, 3);
        let fri = date(2026, 8, 7);
        assert_eq!(business_days_between(mon, fri), 4);
    }

    #[test]
    fn negative_when_deadline_passed() {
        let monday = date(2026, 8, 10);
        let friday = date(2026, 8, 7);
        assert_eq!(business_days_between(monday, friday), -1);

        // A full week back.
        assert_eq!(business_days_between(date(2026, 8, 10), date(2026, 8, 3)), -5);
    }

    #[test]
    fn weekend_deadline_counts_no_extra_days() {
        // Friday -> Saturday crosses no business day.
        let friday = date(2026, 8, 7);
        let saturday = date(2026, 8, 8);
        assert_eq!(business_days_between(friday, saturday), 0);
    }
}
