use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Time left until a holiday starts (local midnight of its date).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    pub is_today: bool,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn until(target: NaiveDate, now: NaiveDateTime) -> Self {
        if target == now.date() {
            return Self {
                is_today: true,
                ..Self::default()
            };
        }

        let remaining = target.and_time(NaiveTime::MIN) - now;
        let total = remaining.num_seconds();
        if total <= 0 {
            return Self::default();
        }

        Self {
            is_today: false,
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
        }
    }

    /// Value/label pairs in display order.
    pub fn segments(&self) -> [(i64, &'static str); 4] {
        [
            (self.days, "DAYS"),
            (self.hours, "HRS"),
            (self.minutes, "MINS"),
            (self.seconds, "SECS"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_countdown_breakdown() {
        let target = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let countdown = Countdown::until(target, at(2025, 12, 22, 21, 30, 15));
        assert!(!countdown.is_today);
        assert_eq!(countdown.days, 2);
        assert_eq!(countdown.hours, 2);
        assert_eq!(countdown.minutes, 29);
        assert_eq!(countdown.seconds, 45);
    }

    #[test]
    fn test_countdown_today() {
        let target = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let countdown = Countdown::until(target, at(2025, 12, 25, 18, 0, 0));
        assert!(countdown.is_today);
        assert_eq!(countdown.days, 0);
    }

    #[test]
    fn test_countdown_past() {
        let target = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(Countdown::until(target, at(2025, 3, 1, 0, 0, 0)), Countdown::default());
    }

    #[test]
    fn test_segments_order() {
        let countdown = Countdown {
            is_today: false,
            days: 1,
            hours: 2,
            minutes: 3,
            seconds: 4,
        };
        let labels: Vec<&str> = countdown.segments().iter().map(|(_, l)| *l).collect();
        assert_eq!(labels, vec!["DAYS", "HRS", "MINS", "SECS"]);
    }
}
