use chrono::{Local, NaiveDateTime};

/// Source of local wall-clock time for audit timestamps and usernames.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    /// ISO-8601 timestamp with microseconds and no offset
    fn timestamp(&self) -> String {
        self.now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Username for a user provisioned at `at`, second granularity.
pub fn username_for(at: NaiveDateTime) -> String {
    format!("User_{}", at.format("%Y%m%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(7, 5, 2, 42)
            .unwrap()
    }

    #[test]
    fn test_username_format() {
        assert_eq!(username_for(instant()), "User_20240309_070502");
    }

    #[test]
    fn test_timestamp_format() {
        let clock = FixedClock(instant());
        assert_eq!(clock.timestamp(), "2024-03-09T07:05:02.000042");
    }

    #[test]
    fn test_system_clock_timestamp_is_parseable() {
        let ts = SystemClock.timestamp();
        assert!(NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
