//! Statistical preparation queries layered next to the base catalog.
//!
//! These produce modeling inputs (forecast series, cohort grids,
//! deviation flags) rather than report rows. Kept as a separate
//! catalog so callers that only want reporting never pull these in.

use crate::error::InsightsResult;
use crate::store::FactStore;
use crate::types::{Quarter, Year};
use rusqlite::params;
use serde::Serialize;

pub struct AdvancedMetrics<'a> {
    store: &'a FactStore,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesPoint {
    pub year: Year,
    pub quarter: Quarter,
    /// Linearized quarter index: `(year - 1) * 4 + quarter`.
    pub time_period: i64,
    pub amount: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CohortActivity {
    /// Linearized first-activity quarter of the cohort's states.
    pub first_period: i64,
    pub period: i64,
    /// Quarters elapsed since the cohort first appeared.
    pub period_number: i64,
    pub cohort_size: i64,
    pub total_users: i64,
    pub total_opens: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnomalyObservation {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub amount: f64,
    pub count: i64,
    pub avg_amount: f64,
    pub amount_deviation_percent: Option<f64>,
    pub count_deviation_percent: Option<f64>,
    /// "Anomaly" when the amount deviates from the state mean by more
    /// than a factor of two, "Normal" otherwise.
    pub anomaly_flag: String,
}

impl<'a> AdvancedMetrics<'a> {
    pub fn new(store: &'a FactStore) -> Self {
        Self { store }
    }

    /// Quarterly series for one state with a linear time index, ready
    /// for downstream forecasting.
    pub fn time_series_prep(&self, state: &str) -> InsightsResult<Vec<TimeSeriesPoint>> {
        self.store.query_rows(
            "SELECT
                year,
                quarter,
                (year - 1) * 4 + quarter AS time_period,
                SUM(transaction_amount) AS amount,
                SUM(transaction_count) AS count
             FROM aggregated_transaction
             WHERE state = ?1
             GROUP BY year, quarter
             ORDER BY year, quarter",
            params![state],
            |row| {
                Ok(TimeSeriesPoint {
                    year: row.get(0)?,
                    quarter: row.get(1)?,
                    time_period: row.get(2)?,
                    amount: row.get(3)?,
                    count: row.get(4)?,
                })
            },
        )
    }

    /// State cohorts keyed by the first quarter each state shows map
    /// engagement, tracked across every later active quarter.
    pub fn cohort_analysis(&self) -> InsightsResult<Vec<CohortActivity>> {
        self.store.query_rows(
            "WITH state_first_activity AS (
                SELECT state, MIN(year * 4 + quarter) AS first_period
                FROM map_user
                GROUP BY state
            ),
            state_activity AS (
                SELECT
                    mu.state,
                    mu.year * 4 + mu.quarter AS period,
                    sfa.first_period,
                    SUM(mu.registered_users) AS users,
                    SUM(mu.app_opens) AS opens
                FROM map_user mu
                JOIN state_first_activity sfa ON mu.state = sfa.state
                GROUP BY mu.state, mu.year, mu.quarter, sfa.first_period
            )
            SELECT
                first_period,
                period,
                period - first_period AS period_number,
                COUNT(DISTINCT state) AS cohort_size,
                SUM(users) AS total_users,
                SUM(opens) AS total_opens
            FROM state_activity
            GROUP BY first_period, period
            ORDER BY first_period, period",
            [],
            |row| {
                Ok(CohortActivity {
                    first_period: row.get(0)?,
                    period: row.get(1)?,
                    period_number: row.get(2)?,
                    cohort_size: row.get(3)?,
                    total_users: row.get(4)?,
                    total_opens: row.get(5)?,
                })
            },
        )
    }

    /// Per-quarter state totals flagged against the state's own mean.
    /// Deviations are NULL for a zero mean, and a NULL deviation never
    /// flags as an anomaly.
    pub fn anomaly_detection(&self) -> InsightsResult<Vec<AnomalyObservation>> {
        self.store.query_rows(
            "WITH quarterly_stats AS (
                SELECT
                    state,
                    year,
                    quarter,
                    SUM(transaction_amount) AS amount,
                    SUM(transaction_count) AS count
                FROM aggregated_transaction
                GROUP BY state, year, quarter
            ),
            state_averages AS (
                SELECT
                    state,
                    AVG(amount) AS avg_amount,
                    AVG(count) AS avg_count
                FROM quarterly_stats
                GROUP BY state
            )
            SELECT
                qs.state,
                qs.year,
                qs.quarter,
                qs.amount,
                qs.count,
                sa.avg_amount,
                ROUND(ABS(qs.amount - sa.avg_amount) / NULLIF(sa.avg_amount, 0) * 100, 2)
                    AS amount_deviation_percent,
                ROUND(ABS(qs.count - sa.avg_count) / NULLIF(sa.avg_count, 0) * 100, 2)
                    AS count_deviation_percent,
                CASE
                    WHEN ABS(qs.amount - sa.avg_amount) / NULLIF(sa.avg_amount, 0) > 2
                        THEN 'Anomaly'
                    ELSE 'Normal'
                END AS anomaly_flag
            FROM quarterly_stats qs
            JOIN state_averages sa ON qs.state = sa.state
            ORDER BY amount_deviation_percent DESC",
            [],
            |row| {
                Ok(AnomalyObservation {
                    state: row.get(0)?,
                    year: row.get(1)?,
                    quarter: row.get(2)?,
                    amount: row.get(3)?,
                    count: row.get(4)?,
                    avg_amount: row.get(5)?,
                    amount_deviation_percent: row.get(6)?,
                    count_deviation_percent: row.get(7)?,
                    anomaly_flag: row.get(8)?,
                })
            },
        )
    }
}
