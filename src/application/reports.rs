//! Revenue and usage reporting over completed sessions.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    DomainError, DomainResult, ParkingRecord, ParkingRecordRepository, RepositoryProvider,
};

/// One completed session as it appears in a report.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub id: i32,
    pub plate_number: String,
    pub slot_number: String,
    pub entry_time: DateTime<Utc>,
    pub exit_time: DateTime<Utc>,
    /// Actual elapsed time in hours, not the rounded-up billed figure.
    pub duration_hours: f64,
    pub amount_paid: i64,
}

/// Aggregates over a report's entries.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_records: usize,
    pub total_amount: i64,
    pub average_duration: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub records: Vec<ReportEntry>,
    pub summary: ReportSummary,
}

/// Read-only reporting over closed parking records.
pub struct ReportService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Sessions that entered on the given UTC day and have been closed.
    pub async fn daily(&self, date: NaiveDate) -> DomainResult<Report> {
        let start = Utc
            .from_utc_datetime(&date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        let end = start + chrono::Duration::days(1);
        let records = self
            .repos
            .parking_records()
            .find_closed_between(start, end)
            .await?;
        Ok(build_report(records))
    }

    /// Sessions that entered in the given month (UTC) and have been closed.
    pub async fn monthly(&self, year: i32, month: u32) -> DomainResult<Report> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            DomainError::Validation(format!("invalid year/month: {year}-{month}"))
        })?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .expect("first of month is valid");

        let start = Utc.from_utc_datetime(&first.and_hms_opt(0, 0, 0).expect("midnight"));
        let end = Utc.from_utc_datetime(&next.and_hms_opt(0, 0, 0).expect("midnight"));
        let records = self
            .repos
            .parking_records()
            .find_closed_between(start, end)
            .await?;
        Ok(build_report(records))
    }

    /// Every closed session, regardless of date.
    pub async fn completed_sessions(&self) -> DomainResult<Report> {
        let records = self.repos.parking_records().find_closed().await?;
        Ok(build_report(records))
    }
}

fn build_report(records: Vec<ParkingRecord>) -> Report {
    let entries: Vec<ReportEntry> = records
        .into_iter()
        .filter_map(|r| {
            let exit_time = r.exit_time?;
            let elapsed = (exit_time - r.entry_time).num_seconds().max(0) as f64 / 3600.0;
            Some(ReportEntry {
                id: r.id,
                plate_number: r.plate_number,
                slot_number: r.slot_number,
                entry_time: r.entry_time,
                exit_time,
                duration_hours: round2(elapsed),
                amount_paid: r.amount_paid,
            })
        })
        .collect();

    let total_amount = entries.iter().map(|e| e.amount_paid).sum();
    let average_duration = if entries.is_empty() {
        0.0
    } else {
        round2(entries.iter().map(|e| e.duration_hours).sum::<f64>() / entries.len() as f64)
    };

    Report {
        summary: ReportSummary {
            total_records: entries.len(),
            total_amount,
            average_duration,
        },
        records: entries,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;
    use chrono::Duration;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    async fn seed_closed(
        records: &dyn ParkingRecordRepository,
        plate: &str,
        entry: DateTime<Utc>,
        hours: i64,
        amount: i64,
    ) -> i32 {
        let record = records.create(plate, "A-01", entry).await.unwrap();
        let exit = entry + Duration::hours(hours);
        records
            .close(record.id, exit, hours as i32, amount)
            .await
            .unwrap();
        record.id
    }

    #[tokio::test]
    async fn daily_report_is_bounded_by_the_utc_day() {
        let repos = InMemoryRepositoryProvider::new();
        let records = repos.parking_records();

        seed_closed(records, "IN-DAY", ts("2026-03-10T08:00:00Z"), 2, 1000).await;
        seed_closed(records, "DAY-BEFORE", ts("2026-03-09T23:00:00Z"), 1, 500).await;
        seed_closed(records, "DAY-AFTER", ts("2026-03-11T00:00:00Z"), 1, 500).await;
        // Still open, never reported.
        records
            .create("OPEN", "A-01", ts("2026-03-10T09:00:00Z"))
            .await
            .unwrap();

        let service = ReportService::new(Arc::new(repos));
        let report = service
            .daily(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap())
            .await
            .unwrap();

        assert_eq!(report.summary.total_records, 1);
        assert_eq!(report.records[0].plate_number, "IN-DAY");
        assert_eq!(report.summary.total_amount, 1000);
        assert_eq!(report.summary.average_duration, 2.0);
    }

    #[tokio::test]
    async fn monthly_report_covers_the_whole_month_and_rejects_bad_months() {
        let repos = InMemoryRepositoryProvider::new();
        let records = repos.parking_records();

        seed_closed(records, "FIRST", ts("2026-12-01T00:00:00Z"), 1, 500).await;
        seed_closed(records, "LAST", ts("2026-12-31T23:59:59Z"), 3, 1500).await;
        seed_closed(records, "NEXT-YEAR", ts("2027-01-01T00:00:00Z"), 1, 500).await;

        let service = ReportService::new(Arc::new(repos));
        let report = service.monthly(2026, 12).await.unwrap();
        assert_eq!(report.summary.total_records, 2);
        assert_eq!(report.summary.total_amount, 2000);

        let err = service.monthly(2026, 13).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn summary_uses_fractional_hours_rounded_to_two_decimals() {
        let repos = InMemoryRepositoryProvider::new();
        let records = repos.parking_records();

        // 1h30m elapsed, billed as 2 hours.
        let entry = ts("2026-03-10T08:00:00Z");
        let record = records.create("RAD 1", "A-01", entry).await.unwrap();
        records
            .close(record.id, entry + Duration::minutes(90), 2, 1000)
            .await
            .unwrap();
        // 20 minutes elapsed, billed at the minimum.
        let record = records.create("RAD 2", "A-01", entry).await.unwrap();
        records
            .close(record.id, entry + Duration::minutes(20), 1, 500)
            .await
            .unwrap();

        let service = ReportService::new(Arc::new(repos));
        let report = service.completed_sessions().await.unwrap();

        assert_eq!(report.summary.total_records, 2);
        let by_plate: Vec<_> = report
            .records
            .iter()
            .map(|e| (e.plate_number.as_str(), e.duration_hours))
            .collect();
        assert!(by_plate.contains(&("RAD 1", 1.5)));
        assert!(by_plate.contains(&("RAD 2", 0.33)));
        // (1.5 + 0.33) / 2 rounded.
        assert_eq!(report.summary.average_duration, 0.92);
    }

    #[tokio::test]
    async fn empty_report_has_zeroed_summary() {
        let repos = InMemoryRepositoryProvider::new();
        let service = ReportService::new(Arc::new(repos));
        let report = service.completed_sessions().await.unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.summary.total_records, 0);
        assert_eq!(report.summary.total_amount, 0);
        assert_eq!(report.summary.average_duration, 0.0);
    }
}
