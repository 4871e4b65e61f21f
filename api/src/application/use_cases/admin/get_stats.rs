use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::application::ports::stats_repository::{DashboardStats, StatsRepository};

pub const SALES_HISTORY_MONTHS: i64 = 6;
pub const TOP_BOOKS: i64 = 10;

pub struct GetStats<'a, S: StatsRepository + ?Sized> {
    pub repo: &'a S,
}

impl<'a, S: StatsRepository + ?Sized> GetStats<'a, S> {
    pub async fn execute(&self, now: DateTime<Utc>) -> anyhow::Result<DashboardStats> {
        let (year_start, month_start) = period_starts(now)?;
        self.repo
            .dashboard(year_start, month_start, SALES_HISTORY_MONTHS, TOP_BOOKS)
            .await
    }
}

/// Midnight UTC on Jan 1 and on the 1st of the current month.
pub fn period_starts(now: DateTime<Utc>) -> anyhow::Result<(DateTime<Utc>, DateTime<Utc>)> {
    let year_start = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid year start for {now}"))?;
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid month start for {now}"))?;
    Ok((year_start, month_start))
}
