//! Application services.
//!
//! Services own the use-case logic and speak to storage only through the
//! [`crate::domain::RepositoryProvider`] abstraction, so they can be
//! exercised directly against the in-memory provider in tests.

pub mod reports;
pub mod session;

pub use reports::{Report, ReportEntry, ReportService, ReportSummary};
pub use session::{CloseSession, ClosedSession, OpenSession, SessionService, SettlePayment};
