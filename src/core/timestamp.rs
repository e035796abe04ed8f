use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::retention::RetentionWindow;

pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Everything modified strictly before this instant is out of retention.
pub fn cutoff(now: DateTime<Utc>, window: RetentionWindow) -> DateTime<Utc> {
    now - window.duration()
}

pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

pub fn to_system_time(time: DateTime<Utc>) -> SystemTime {
    SystemTime::from(time)
}

pub fn age_days(modified: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - modified).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_cutoff_subtracts_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let cut = cutoff(now, RetentionWindow::Thirty);
        assert_eq!(cut, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_system_time_round_trip() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::nanoseconds(17);
        assert_eq!(from_system_time(to_system_time(now)), now);
    }

    #[test]
    fn test_age_days() {
        let now = utc_now();
        assert_eq!(age_days(now - Duration::days(31), now), 31);
        assert_eq!(age_days(now, now), 0);
    }
}
