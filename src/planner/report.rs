//! Weekly "Monday to today" nutrition report.
//!
//! The window opens on Monday 00:00 and closes on Sunday 12:00. Sunday
//! belongs to the week that started the previous Monday. Everything here is
//! a function of the `now` passed in; nothing reads the system clock.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use tracing::warn;

use crate::catalog::ProductSource;
use crate::models::{Order, OrderStatus};
use crate::planner::aggregation::{NutrientTotals, aggregate};
use crate::planner::constants::{DAYS_PER_WEEK, RESET_HOUR};
use crate::planner::targets::ComparisonTargets;

/// Reporting window bounds evaluated at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub now: NaiveDateTime,
    pub monday: NaiveDateTime,
    pub sunday_noon: NaiveDateTime,
    pub reset_applied: bool,
    /// Days of targets the report compares against, 1 to 7.
    pub elapsed_days: i64,
}

impl ReportWindow {
    pub fn at(now: NaiveDateTime) -> Self {
        let since_monday = now.weekday().num_days_from_monday() as i64;
        let monday = (now.date() - Duration::days(since_monday)).and_time(NaiveTime::MIN);
        let sunday_noon = monday + Duration::days(6) + Duration::hours(RESET_HOUR as i64);
        let reset_applied = now >= sunday_noon;

        let elapsed_days = if reset_applied {
            DAYS_PER_WEEK
        } else {
            ((now - monday).num_days() + 1).max(1)
        };

        Self {
            now,
            monday,
            sunday_noon,
            reset_applied,
            elapsed_days,
        }
    }

    /// Whether an order placed on `date` counts toward this week.
    ///
    /// Compares dates only. A closed window includes nothing.
    pub fn includes(&self, date: NaiveDate) -> bool {
        !self.reset_applied && date >= self.monday.date() && date <= self.now.date()
    }

    pub fn period_label(&self) -> String {
        if self.reset_applied {
            let next_monday = self.monday + Duration::days(DAYS_PER_WEEK);
            format!("New week starts {}", next_monday.format("%a %d %b"))
        } else {
            format!(
                "{} - {}",
                self.monday.format("%a %d %b"),
                self.now.format("%a %d %b")
            )
        }
    }
}

/// Report shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub period_label: String,
    pub reset_applied: bool,
    pub elapsed_days: i64,
    pub values: NutrientTotals,
    pub targets: ComparisonTargets,
}

/// Parse an order timestamp down to its calendar date.
///
/// Accepts RFC 3339 (date taken in the timestamp's own offset), a naive
/// `YYYY-MM-DDTHH:MM:SS`, or a plain `YYYY-MM-DD`.
pub fn order_date(ordered_at: &str) -> Option<NaiveDate> {
    let text = ordered_at.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local().date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Parse an order timestamp to seconds since the Unix epoch.
///
/// RFC 3339 values keep their offset. Naive timestamps are read as UTC and a
/// plain date as UTC midnight.
pub fn order_instant(ordered_at: &str) -> Option<i64> {
    let text = ordered_at.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().timestamp())
}

/// Build the weekly report from order history.
///
/// `daily` is the per-day comparison set; the report scales it by the
/// elapsed days. Cancelled orders and orders with unreadable dates are
/// left out.
pub fn weekly_report<'a, S>(
    now: NaiveDateTime,
    orders: impl IntoIterator<Item = &'a Order>,
    products: &S,
    daily: &ComparisonTargets,
) -> WeeklyReport
where
    S: ProductSource + ?Sized,
{
    let window = ReportWindow::at(now);

    let items = orders
        .into_iter()
        .filter(|order| order.status != OrderStatus::Cancelled)
        .filter(|order| match order_date(&order.ordered_at) {
            Some(date) => window.includes(date),
            None => {
                warn!("order {} has unreadable date '{}'", order.id, order.ordered_at);
                false
            }
        })
        .flat_map(|order| order.items.iter());

    let values = aggregate(items, products);

    WeeklyReport {
        period_label: window.period_label(),
        reset_applied: window.reset_applied,
        elapsed_days: window.elapsed_days,
        values,
        targets: daily.scaled(window.elapsed_days),
    }
}
