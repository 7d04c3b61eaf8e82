//! Parking record (session) domain entity and fee schedule

use chrono::{DateTime, Duration, Utc};

/// One vehicle's occupancy of one slot, from entry to exit.
///
/// Invariants: `exit_time`, once set, never changes; `duration_hours` and
/// `amount_paid` are computed exactly when `exit_time` transitions from
/// unset to set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingRecord {
    /// Auto-assigned record ID
    pub id: i32,
    /// Plate number of the parked vehicle
    pub plate_number: String,
    /// Slot the vehicle occupies
    pub slot_number: String,
    pub entry_time: DateTime<Utc>,
    /// Set once at closure; `None` means the session is still active
    pub exit_time: Option<DateTime<Utc>>,
    /// Billed duration in whole hours (partial hours rounded up)
    pub duration_hours: i32,
    /// Fee owed for the session, in RWF
    pub amount_paid: i64,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ParkingRecord {
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}

/// Hourly pricing used when a session closes.
///
/// `amount = max(minimum_fee, billed_hours * per_hour_rate)`, where
/// `billed_hours` rounds any partial hour up to a full one.
#[derive(Debug, Clone, Copy)]
pub struct FeeSchedule {
    /// Rate per started hour, in RWF
    pub per_hour_rate: i64,
    /// Floor applied to every closed session, in RWF
    pub minimum_fee: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            per_hour_rate: 500,
            minimum_fee: 500,
        }
    }
}

impl FeeSchedule {
    /// Billed hours between entry and exit: `ceil(delta / 1h)`, never
    /// negative.
    pub fn billed_hours(&self, entry: DateTime<Utc>, exit: DateTime<Utc>) -> i32 {
        let delta = exit.signed_duration_since(entry).max(Duration::zero());
        let seconds = delta.num_seconds() as u64;
        (seconds.div_ceil(3600)).min(i32::MAX as u64) as i32
    }

    pub fn amount_for(&self, billed_hours: i32) -> i64 {
        (billed_hours as i64 * self.per_hour_rate).max(self.minimum_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, h, m, 0).unwrap()
    }

    #[test]
    fn partial_hour_bills_as_full_hour() {
        let fees = FeeSchedule::default();
        // entry 10:00, exit 11:30 => 2 billed hours, 1000 RWF
        let hours = fees.billed_hours(at(10, 0), at(11, 30));
        assert_eq!(hours, 2);
        assert_eq!(fees.amount_for(hours), 1000);
    }

    #[test]
    fn exact_hours_are_not_rounded_up() {
        let fees = FeeSchedule::default();
        let hours = fees.billed_hours(at(10, 0), at(13, 0));
        assert_eq!(hours, 3);
        assert_eq!(fees.amount_for(hours), 1500);
    }

    #[test]
    fn minimum_fee_applies_to_instant_exit() {
        let fees = FeeSchedule::default();
        let hours = fees.billed_hours(at(10, 0), at(10, 0));
        assert_eq!(hours, 0);
        assert_eq!(fees.amount_for(hours), 500);
    }

    #[test]
    fn one_second_bills_one_hour() {
        let fees = FeeSchedule::default();
        let entry = at(10, 0);
        let exit = entry + Duration::seconds(1);
        assert_eq!(fees.billed_hours(entry, exit), 1);
    }

    #[test]
    fn clock_skew_never_produces_negative_hours() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.billed_hours(at(11, 0), at(10, 0)), 0);
    }
}
