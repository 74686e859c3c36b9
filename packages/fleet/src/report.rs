//! Per-date status report for the admin dashboard.

use chrono::NaiveDate;

use crate::models::{AvailabilityStatus, User};

/// The roster split by status on one date, each group in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub available: Vec<User>,
    pub unavailable: Vec<User>,
    /// Drivers with no entry for the date.
    pub pending: Vec<User>,
}

impl DailyReport {
    pub fn build<F>(date: NaiveDate, drivers: &[User], status_of: F) -> Self
    where
        F: Fn(&str, NaiveDate) -> Option<AvailabilityStatus>,
    {
        let mut report = Self {
            date,
            available: Vec::new(),
            unavailable: Vec::new(),
            pending: Vec::new(),
        };
        for driver in drivers {
            let bucket = match status_of(&driver.id, date) {
                Some(AvailabilityStatus::Available) => &mut report.available,
                Some(AvailabilityStatus::Unavailable) => &mut report.unavailable,
                None => &mut report.pending,
            };
            bucket.push(driver.clone());
        }
        report
    }

    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    pub fn unavailable_count(&self) -> usize {
        self.unavailable.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn total(&self) -> usize {
        self.available.len() + self.unavailable.len() + self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_date;

    #[test]
    fn test_partition_keeps_roster_order() {
        let day = parse_date("2025-03-01").unwrap();
        let drivers = vec![
            User::driver("a", "A", "1", None),
            User::driver("b", "B", "2", None),
            User::driver("c", "C", "3", None),
            User::driver("d", "D", "4", None),
        ];
        let report = DailyReport::build(day, &drivers, |id, _| match id {
            "a" | "c" => Some(AvailabilityStatus::Available),
            "b" => Some(AvailabilityStatus::Unavailable),
            _ => None,
        });

        fn ids(users: &[User]) -> Vec<String> {
            users.iter().map(|u| u.id.clone()).collect()
        }
        assert_eq!(ids(&report.available), vec!["a", "c"]);
        assert_eq!(ids(&report.unavailable), vec!["b"]);
        assert_eq!(ids(&report.pending), vec!["d"]);
        assert_eq!(report.total(), 4);
        assert_eq!(report.pending_count(), 1);
    }

    #[test]
    fn test_empty_roster() {
        let day = parse_date("2025-03-01").unwrap();
        let report = DailyReport::build(day, &[], |_, _| Some(AvailabilityStatus::Available));
        assert_eq!(report.total(), 0);
    }
}
