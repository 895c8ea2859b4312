//! The metrics query catalog.
//!
//! Every operation is a pure, read-only aggregation over the fact
//! tables: it borrows the store handle injected at construction, runs
//! one parameterized query (or a small bundle), and returns typed rows.
//!
//! Ratio-style fields (shares, growth, deviations) are `Option<f64>`
//! and NULL-guarded in SQL, so a zero denominator surfaces as `None`,
//! never as an infinity or a NaN. An empty or missing dimension yields
//! an empty vector; only store-level failures return `Err`.

pub mod advanced;

use crate::error::InsightsResult;
use crate::store::FactStore;
use crate::types::{Quarter, Year};
use rusqlite::params;
use serde::Serialize;

pub struct MetricsCatalog<'a> {
    store: &'a FactStore,
}

// ── Result rows ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TransactionOverview {
    pub total_rows: i64,
    pub total_transaction_count: Option<i64>,
    pub total_transaction_amount: Option<f64>,
    pub avg_transaction_amount: Option<f64>,
    pub unique_states: i64,
    pub unique_transaction_types: i64,
    pub earliest_year: Option<Year>,
    pub latest_year: Option<Year>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateRanking {
    pub state: String,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub years_active: i64,
    pub transaction_types: i64,
    pub percentage_of_total: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuarterlyTrend {
    /// `None` when the query was filtered to a single year.
    pub year: Option<Year>,
    pub quarter: Quarter,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub states_active: i64,
    pub types_active: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeBreakdown {
    pub transaction_type: String,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub states_covered: i64,
    pub years_active: i64,
    /// Share of the grand total amount.
    pub amount_share: Option<f64>,
    /// Share of the grand total transaction count — its own base.
    pub count_share: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BrandBreakdown {
    pub brand: String,
    pub total_users: i64,
    pub avg_market_share: f64,
    pub min_market_share: f64,
    pub max_market_share: f64,
    pub states_present: i64,
    pub years_active: i64,
    pub overall_market_share: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsuranceBreakdown {
    pub insurance_type: String,
    pub total_policies: i64,
    pub total_premium: f64,
    pub avg_premium: f64,
    pub min_premium: f64,
    pub max_premium: f64,
    pub states_covered: i64,
    pub years_active: i64,
    pub premium_share: Option<f64>,
    pub policy_share: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DistrictPerformance {
    pub district: String,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub years_active: i64,
    pub quarters_active: i64,
    /// Share of the filtered state's total, not the whole table's.
    pub state_share: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEngagement {
    /// District name when scoped to one state, state name otherwise.
    pub region: String,
    pub total_registered_users: i64,
    pub total_app_opens: i64,
    pub avg_opens_per_user: Option<f64>,
    pub min_users: i64,
    pub max_users: i64,
    /// Only populated in the national (per-state) shape.
    pub districts_covered: Option<i64>,
    pub years_active: i64,
    pub user_share: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PincodeMetric {
    TransactionAmount,
    RegisteredUsers,
}

#[derive(Debug, Clone, Serialize)]
pub struct PincodeTransactionRanking {
    pub state: String,
    pub pincode: String,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub years_active: i64,
    pub quarters_active: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PincodeUserRanking {
    pub state: String,
    pub pincode: String,
    pub total_users: i64,
    pub years_active: i64,
    pub quarters_active: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "metric", content = "rows", rename_all = "snake_case")]
pub enum TopPincodes {
    TransactionAmount(Vec<PincodeTransactionRanking>),
    RegisteredUsers(Vec<PincodeUserRanking>),
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthAnalysis {
    pub year: Year,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub active_states: i64,
    pub active_types: i64,
    pub amount_growth_percent: Option<f64>,
    pub transaction_growth_percent: Option<f64>,
    pub state_expansion_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeasonalPattern {
    pub quarter: Quarter,
    pub avg_transactions: f64,
    pub avg_amount: f64,
    pub min_amount: f64,
    pub max_amount: f64,
    pub states_active: i64,
    pub years_analyzed: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketConcentration {
    pub state_rank: i64,
    pub state: String,
    pub total_amount: f64,
    pub individual_percentage: Option<f64>,
    pub cumulative_percentage: Option<f64>,
    pub market_segment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateReportTransactions {
    pub year: Year,
    pub quarter: Quarter,
    pub transaction_type: String,
    pub transactions: i64,
    pub amount: f64,
    pub avg_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateReportBrands {
    pub year: Year,
    pub brand: String,
    pub total_users: i64,
    pub avg_percentage: f64,
    pub min_percentage: f64,
    pub max_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateReportDistricts {
    pub district: String,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub avg_amount: f64,
    pub total_users: Option<i64>,
    pub total_app_opens: Option<i64>,
    pub avg_opens_per_user: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateReportInsurance {
    pub year: Year,
    pub insurance_type: String,
    pub policies: i64,
    pub premium: f64,
    pub avg_premium: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateReportPincodes {
    pub pincode: String,
    pub total_transactions: i64,
    pub total_amount: f64,
    pub total_users: Option<i64>,
}

/// Five independent sub-results for one state.
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    pub transactions: Vec<StateReportTransactions>,
    pub brands: Vec<StateReportBrands>,
    pub districts: Vec<StateReportDistricts>,
    pub insurance: Vec<StateReportInsurance>,
    pub top_pincodes: Vec<StateReportPincodes>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationRow {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub transaction_amount: f64,
    pub transaction_count: i64,
    pub avg_user_count: Option<f64>,
    pub insurance_amount: Option<f64>,
    pub registered_users: Option<i64>,
    pub app_opens: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvancedKpis {
    /// Daily-normalized averages: quarterly sums divided by the quarter's
    /// day count (Q1 90, Q2 91, Q3 92, Q4 92).
    pub avg_daily_transactions: Option<f64>,
    pub avg_daily_amount: Option<f64>,
    pub total_states: i64,
    /// Registered users per assumed 1,000,000 addressable users per state.
    pub avg_user_penetration: Option<f64>,
    pub avg_customer_lifetime_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompetitiveRanking {
    pub state: String,
    pub total_amount: f64,
    pub total_transactions: i64,
    pub transaction_diversity: i64,
    pub avg_transaction_size: f64,
    pub amount_rank: i64,
    pub volume_rank: i64,
    pub diversity_rank: i64,
    pub size_rank: i64,
    /// Mean of the four ranks — lower is better.
    pub overall_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FraudRiskIndicator {
    pub state: String,
    pub transaction_type: String,
    pub avg_amount: f64,
    pub max_amount: f64,
    pub min_amount: f64,
    pub transaction_frequency: i64,
    pub risk_level: String,
    pub deviation_percentage: Option<f64>,
}

// ── Operations ───────────────────────────────────────────────────────────────

impl<'a> MetricsCatalog<'a> {
    pub fn new(store: &'a FactStore) -> Self {
        Self { store }
    }

    /// Single-row summary over all of `aggregated_transaction`.
    pub fn overview(&self) -> InsightsResult<TransactionOverview> {
        self.store.query_row(
            "SELECT
                COUNT(*) AS total_rows,
                SUM(transaction_count) AS total_transaction_count,
                SUM(transaction_amount) AS total_transaction_amount,
                AVG(transaction_amount) AS avg_transaction_amount,
                COUNT(DISTINCT state) AS unique_states,
                COUNT(DISTINCT transaction_type) AS unique_transaction_types,
                MIN(year) AS earliest_year,
                MAX(year) AS latest_year
             FROM aggregated_transaction",
            [],
            |row| {
                Ok(TransactionOverview {
                    total_rows: row.get(0)?,
                    total_transaction_count: row.get(1)?,
                    total_transaction_amount: row.get(2)?,
                    avg_transaction_amount: row.get(3)?,
                    unique_states: row.get(4)?,
                    unique_transaction_types: row.get(5)?,
                    earliest_year: row.get(6)?,
                    latest_year: row.get(7)?,
                })
            },
        )
    }

    /// Top states by transaction amount, with each state's share of the
    /// grand total.
    pub fn state_ranking(&self, limit: i64) -> InsightsResult<Vec<StateRanking>> {
        self.store.query_rows(
            "SELECT
                state,
                SUM(transaction_count) AS total_transactions,
                SUM(transaction_amount) AS total_amount,
                AVG(transaction_amount) AS avg_amount,
                COUNT(DISTINCT year) AS years_active,
                COUNT(DISTINCT transaction_type) AS transaction_types,
                ROUND(SUM(transaction_amount) * 100.0 /
                      (SELECT SUM(transaction_amount) FROM aggregated_transaction),
                      2) AS percentage_of_total
             FROM aggregated_transaction
             GROUP BY state
             ORDER BY total_amount DESC
             LIMIT ?1",
            params![limit],
            |row| {
                Ok(StateRanking {
                    state: row.get(0)?,
                    total_transactions: row.get(1)?,
                    total_amount: row.get(2)?,
                    avg_amount: row.get(3)?,
                    years_active: row.get(4)?,
                    transaction_types: row.get(5)?,
                    percentage_of_total: row.get(6)?,
                })
            },
        )
    }

    /// Quarterly totals, either within one year (grouped by quarter) or
    /// across all years (grouped by year and quarter).
    pub fn quarterly_trend(&self, year: Option<Year>) -> InsightsResult<Vec<QuarterlyTrend>> {
        match year {
            Some(y) => self.store.query_rows(
                "SELECT
                    quarter,
                    SUM(transaction_count) AS total_transactions,
                    SUM(transaction_amount) AS total_amount,
                    AVG(transaction_amount) AS avg_amount,
                    COUNT(DISTINCT state) AS states_active,
                    COUNT(DISTINCT transaction_type) AS types_active
                 FROM aggregated_transaction
                 WHERE year = ?1
                 GROUP BY quarter
                 ORDER BY quarter",
                params![y],
                |row| {
                    Ok(QuarterlyTrend {
                        year: None,
                        quarter: row.get(0)?,
                        total_transactions: row.get(1)?,
                        total_amount: row.get(2)?,
                        avg_amount: row.get(3)?,
                        states_active: row.get(4)?,
                        types_active: row.get(5)?,
                    })
                },
            ),
            None => self.store.query_rows(
                "SELECT
                    year,
                    quarter,
                    SUM(transaction_count) AS total_transactions,
                    SUM(transaction_amount) AS total_amount,
                    AVG(transaction_amount) AS avg_amount,
                    COUNT(DISTINCT state) AS states_active,
                    COUNT(DISTINCT transaction_type) AS types_active
                 FROM aggregated_transaction
                 GROUP BY year, quarter
                 ORDER BY year, quarter",
                [],
                |row| {
                    Ok(QuarterlyTrend {
                        year: Some(row.get(0)?),
                        quarter: row.get(1)?,
                        total_transactions: row.get(2)?,
                        total_amount: row.get(3)?,
                        avg_amount: row.get(4)?,
                        states_active: row.get(5)?,
                        types_active: row.get(6)?,
                    })
                },
            ),
        }
    }

    /// Per-type totals with two independent shares: amount share against
    /// the total amount, count share against the total count.
    pub fn type_breakdown(&self) -> InsightsResult<Vec<TypeBreakdown>> {
        self.store.query_rows(
            "SELECT
                transaction_type,
                SUM(transaction_count) AS total_transactions,
                SUM(transaction_amount) AS total_amount,
                AVG(transaction_amount) AS avg_amount,
                MIN(transaction_amount) AS min_amount,
                MAX(transaction_amount) AS max_amount,
                COUNT(DISTINCT state) AS states_covered,
                COUNT(DISTINCT year) AS years_active,
                ROUND(SUM(transaction_amount) * 100.0 /
                      (SELECT SUM(transaction_amount) FROM aggregated_transaction),
                      2) AS amount_share,
                ROUND(SUM(transaction_count) * 100.0 /
                      (SELECT SUM(transaction_count) FROM aggregated_transaction),
                      2) AS count_share
             FROM aggregated_transaction
             GROUP BY transaction_type
             ORDER BY total_amount DESC",
            [],
            |row| {
                Ok(TypeBreakdown {
                    transaction_type: row.get(0)?,
                    total_transactions: row.get(1)?,
                    total_amount: row.get(2)?,
                    avg_amount: row.get(3)?,
                    min_amount: row.get(4)?,
                    max_amount: row.get(5)?,
                    states_covered: row.get(6)?,
                    years_active: row.get(7)?,
                    amount_share: row.get(8)?,
                    count_share: row.get(9)?,
                })
            },
        )
    }

    /// Device-brand mix from `aggregated_user`.
    pub fn brand_breakdown(&self, limit: i64) -> InsightsResult<Vec<BrandBreakdown>> {
        self.store.query_rows(
            "SELECT
                brands,
                SUM(count) AS total_users,
                AVG(percentage) AS avg_market_share,
                MIN(percentage) AS min_market_share,
                MAX(percentage) AS max_market_share,
                COUNT(DISTINCT state) AS states_present,
                COUNT(DISTINCT year) AS years_active,
                ROUND(SUM(count) * 100.0 /
                      (SELECT SUM(count) FROM aggregated_user),
                      2) AS overall_market_share
             FROM aggregated_user
             GROUP BY brands
             ORDER BY total_users DESC
             LIMIT ?1",
            params![limit],
            |row| {
                Ok(BrandBreakdown {
                    brand: row.get(0)?,
                    total_users: row.get(1)?,
                    avg_market_share: row.get(2)?,
                    min_market_share: row.get(3)?,
                    max_market_share: row.get(4)?,
                    states_present: row.get(5)?,
                    years_active: row.get(6)?,
                    overall_market_share: row.get(7)?,
                })
            },
        )
    }

    /// Insurance adoption by type, with premium and policy-count shares
    /// computed against their own bases.
    pub fn insurance_breakdown(&self) -> InsightsResult<Vec<InsuranceBreakdown>> {
        self.store.query_rows(
            "SELECT
                insurance_type,
                SUM(insurance_count) AS total_policies,
                SUM(insurance_amount) AS total_premium,
                AVG(insurance_amount) AS avg_premium,
                MIN(insurance_amount) AS min_premium,
                MAX(insurance_amount) AS max_premium,
                COUNT(DISTINCT state) AS states_covered,
                COUNT(DISTINCT year) AS years_active,
                ROUND(SUM(insurance_amount) * 100.0 /
                      (SELECT SUM(insurance_amount) FROM aggregated_insurance),
                      2) AS premium_share,
                ROUND(SUM(insurance_count) * 100.0 /
                      (SELECT SUM(insurance_count) FROM aggregated_insurance),
                      2) AS policy_share
             FROM aggregated_insurance
             GROUP BY insurance_type
             ORDER BY total_premium DESC",
            [],
            |row| {
                Ok(InsuranceBreakdown {
                    insurance_type: row.get(0)?,
                    total_policies: row.get(1)?,
                    total_premium: row.get(2)?,
                    avg_premium: row.get(3)?,
                    min_premium: row.get(4)?,
                    max_premium: row.get(5)?,
                    states_covered: row.get(6)?,
                    years_active: row.get(7)?,
                    premium_share: row.get(8)?,
                    policy_share: row.get(9)?,
                })
            },
        )
    }

    /// Top districts within one state. The share denominator is scoped
    /// to the filtered state, not the whole table.
    pub fn district_performance(
        &self,
        state: &str,
        limit: i64,
    ) -> InsightsResult<Vec<DistrictPerformance>> {
        self.store.query_rows(
            "SELECT
                district,
                SUM(count) AS total_transactions,
                SUM(amount) AS total_amount,
                AVG(amount) AS avg_amount,
                COUNT(DISTINCT year) AS years_active,
                COUNT(DISTINCT quarter) AS quarters_active,
                ROUND(SUM(amount) * 100.0 /
                      (SELECT SUM(amount) FROM map_transaction WHERE state = ?1),
                      2) AS state_share
             FROM map_transaction
             WHERE state = ?1
             GROUP BY district
             ORDER BY total_amount DESC
             LIMIT ?2",
            params![state, limit],
            |row| {
                Ok(DistrictPerformance {
                    district: row.get(0)?,
                    total_transactions: row.get(1)?,
                    total_amount: row.get(2)?,
                    avg_amount: row.get(3)?,
                    years_active: row.get(4)?,
                    quarters_active: row.get(5)?,
                    state_share: row.get(6)?,
                })
            },
        )
    }

    /// Engagement per district within one state, or per state nationally.
    /// Opens-per-user averages each row's ratio with a zero-user guard.
    pub fn user_engagement(&self, state: Option<&str>) -> InsightsResult<Vec<UserEngagement>> {
        match state {
            Some(s) => self.engagement_by_district(s),
            None => self.engagement_by_state(),
        }
    }

    fn engagement_by_district(&self, state: &str) -> InsightsResult<Vec<UserEngagement>> {
        self.store.query_rows(
            "SELECT
                district,
                SUM(registered_users) AS total_registered_users,
                SUM(app_opens) AS total_app_opens,
                ROUND(AVG(CAST(app_opens AS REAL) / NULLIF(registered_users, 0)), 2)
                    AS avg_opens_per_user,
                MIN(registered_users) AS min_users,
                MAX(registered_users) AS max_users,
                COUNT(DISTINCT year) AS years_active,
                ROUND(SUM(registered_users) * 100.0 /
                      (SELECT SUM(registered_users) FROM map_user WHERE state = ?1),
                      2) AS user_share
             FROM map_user
             WHERE state = ?1
             GROUP BY district
             ORDER BY total_registered_users DESC",
            params![state],
            |row| {
                Ok(UserEngagement {
                    region: row.get(0)?,
                    total_registered_users: row.get(1)?,
                    total_app_opens: row.get(2)?,
                    avg_opens_per_user: row.get(3)?,
                    min_users: row.get(4)?,
                    max_users: row.get(5)?,
                    districts_covered: None,
                    years_active: row.get(6)?,
                    user_share: row.get(7)?,
                })
            },
        )
    }

    fn engagement_by_state(&self) -> InsightsResult<Vec<UserEngagement>> {
        self.store.query_rows(
            "SELECT
                state,
                SUM(registered_users) AS total_registered_users,
                SUM(app_opens) AS total_app_opens,
                ROUND(AVG(CAST(app_opens AS REAL) / NULLIF(registered_users, 0)), 2)
                    AS avg_opens_per_user,
                MIN(registered_users) AS min_users,
                MAX(registered_users) AS max_users,
                COUNT(DISTINCT district) AS districts_covered,
                COUNT(DISTINCT year) AS years_active,
                ROUND(SUM(registered_users) * 100.0 /
                      (SELECT SUM(registered_users) FROM map_user),
                      2) AS user_share
             FROM map_user
             GROUP BY state
             ORDER BY total_registered_users DESC",
            [],
            |row| {
                Ok(UserEngagement {
                    region: row.get(0)?,
                    total_registered_users: row.get(1)?,
                    total_app_opens: row.get(2)?,
                    avg_opens_per_user: row.get(3)?,
                    min_users: row.get(4)?,
                    max_users: row.get(5)?,
                    districts_covered: Some(row.get(6)?),
                    years_active: row.get(7)?,
                    user_share: row.get(8)?,
                })
            },
        )
    }

    /// Pincode leaderboard by the chosen measure.
    pub fn top_pincodes(&self, metric: PincodeMetric, limit: i64) -> InsightsResult<TopPincodes> {
        match metric {
            PincodeMetric::TransactionAmount => {
                let rows = self.store.query_rows(
                    "SELECT
                        state,
                        pincode,
                        SUM(transaction_count) AS total_transactions,
                        SUM(transaction_amount) AS total_amount,
                        AVG(transaction_amount) AS avg_amount,
                        COUNT(DISTINCT year) AS years_active,
                        COUNT(DISTINCT quarter) AS quarters_active
                     FROM top_transaction
                     GROUP BY state, pincode
                     ORDER BY total_amount DESC
                     LIMIT ?1",
                    params![limit],
                    |row| {
                        Ok(PincodeTransactionRanking {
                            state: row.get(0)?,
                            pincode: row.get(1)?,
                            total_transactions: row.get(2)?,
                            total_amount: row.get(3)?,
                            avg_amount: row.get(4)?,
                            years_active: row.get(5)?,
                            quarters_active: row.get(6)?,
                        })
                    },
                )?;
                Ok(TopPincodes::TransactionAmount(rows))
            }
            PincodeMetric::RegisteredUsers => {
                let rows = self.store.query_rows(
                    "SELECT
                        state,
                        pincode,
                        SUM(registered_users) AS total_users,
                        COUNT(DISTINCT year) AS years_active,
                        COUNT(DISTINCT quarter) AS quarters_active
                     FROM top_user
                     GROUP BY state, pincode
                     ORDER BY total_users DESC
                     LIMIT ?1",
                    params![limit],
                    |row| {
                        Ok(PincodeUserRanking {
                            state: row.get(0)?,
                            pincode: row.get(1)?,
                            total_users: row.get(2)?,
                            years_active: row.get(3)?,
                            quarters_active: row.get(4)?,
                        })
                    },
                )?;
                Ok(TopPincodes::RegisteredUsers(rows))
            }
        }
    }

    /// Year-over-year growth. The previous value is the immediately
    /// preceding year present in the result set, not necessarily year-1;
    /// growth is NULL when there is no previous row or the previous
    /// value is zero or negative.
    pub fn growth_analysis(&self) -> InsightsResult<Vec<GrowthAnalysis>> {
        self.store.query_rows(
            "WITH yearly_data AS (
                SELECT
                    year,
                    SUM(transaction_count) AS total_transactions,
                    SUM(transaction_amount) AS total_amount,
                    COUNT(DISTINCT state) AS active_states,
                    COUNT(DISTINCT transaction_type) AS active_types
                FROM aggregated_transaction
                GROUP BY year
            ),
            growth_calc AS (
                SELECT
                    year,
                    total_transactions,
                    total_amount,
                    active_states,
                    active_types,
                    LAG(total_amount) OVER (ORDER BY year) AS prev_year_amount,
                    LAG(total_transactions) OVER (ORDER BY year) AS prev_year_transactions,
                    LAG(active_states) OVER (ORDER BY year) AS prev_year_states
                FROM yearly_data
            )
            SELECT
                year,
                total_transactions,
                total_amount,
                active_states,
                active_types,
                CASE
                    WHEN prev_year_amount IS NOT NULL AND prev_year_amount > 0 THEN
                        ROUND((total_amount - prev_year_amount) * 100.0 / prev_year_amount, 2)
                    ELSE NULL
                END AS amount_growth_percent,
                CASE
                    WHEN prev_year_transactions IS NOT NULL AND prev_year_transactions > 0 THEN
                        ROUND((total_transactions - prev_year_transactions) * 100.0
                              / prev_year_transactions, 2)
                    ELSE NULL
                END AS transaction_growth_percent,
                CASE
                    WHEN prev_year_states IS NOT NULL AND prev_year_states > 0 THEN
                        ROUND((active_states - prev_year_states) * 100.0 / prev_year_states, 2)
                    ELSE NULL
                END AS state_expansion_percent
            FROM growth_calc
            ORDER BY year",
            [],
            |row| {
                Ok(GrowthAnalysis {
                    year: row.get(0)?,
                    total_transactions: row.get(1)?,
                    total_amount: row.get(2)?,
                    active_states: row.get(3)?,
                    active_types: row.get(4)?,
                    amount_growth_percent: row.get(5)?,
                    transaction_growth_percent: row.get(6)?,
                    state_expansion_percent: row.get(7)?,
                })
            },
        )
    }

    /// Quarter-level seasonality ignoring year.
    pub fn seasonal_analysis(&self) -> InsightsResult<Vec<SeasonalPattern>> {
        self.store.query_rows(
            "SELECT
                quarter,
                AVG(transaction_count) AS avg_transactions,
                AVG(transaction_amount) AS avg_amount,
                MIN(transaction_amount) AS min_amount,
                MAX(transaction_amount) AS max_amount,
                COUNT(DISTINCT state) AS states_active,
                COUNT(DISTINCT year) AS years_analyzed
             FROM aggregated_transaction
             GROUP BY quarter
             ORDER BY quarter",
            [],
            |row| {
                Ok(SeasonalPattern {
                    quarter: row.get(0)?,
                    avg_transactions: row.get(1)?,
                    avg_amount: row.get(2)?,
                    min_amount: row.get(3)?,
                    max_amount: row.get(4)?,
                    states_active: row.get(5)?,
                    years_analyzed: row.get(6)?,
                })
            },
        )
    }

    /// Pareto-style concentration: states ranked by total amount with a
    /// running cumulative share and a segment bucket. Ties on amount
    /// break lexically by state name so ranks are deterministic.
    pub fn market_concentration(&self) -> InsightsResult<Vec<MarketConcentration>> {
        self.store.query_rows(
            "WITH state_totals AS (
                SELECT state, SUM(transaction_amount) AS total_amount
                FROM aggregated_transaction
                GROUP BY state
            ),
            ranked_states AS (
                SELECT
                    state,
                    total_amount,
                    ROW_NUMBER() OVER (ORDER BY total_amount DESC, state ASC) AS state_rank,
                    SUM(total_amount) OVER () AS grand_total
                FROM state_totals
            ),
            cumulative_analysis AS (
                SELECT
                    state_rank,
                    state,
                    total_amount,
                    ROUND(total_amount * 100.0 / grand_total, 2) AS individual_percentage,
                    ROUND(SUM(total_amount) OVER (ORDER BY state_rank) * 100.0 / grand_total, 2)
                        AS cumulative_percentage
                FROM ranked_states
            )
            SELECT
                state_rank,
                state,
                total_amount,
                individual_percentage,
                cumulative_percentage,
                CASE
                    WHEN cumulative_percentage <= 80 THEN 'Top 80%'
                    WHEN cumulative_percentage <= 95 THEN 'Next 15%'
                    ELSE 'Bottom 5%'
                END AS market_segment
            FROM cumulative_analysis
            ORDER BY state_rank",
            [],
            |row| {
                Ok(MarketConcentration {
                    state_rank: row.get(0)?,
                    state: row.get(1)?,
                    total_amount: row.get(2)?,
                    individual_percentage: row.get(3)?,
                    cumulative_percentage: row.get(4)?,
                    market_segment: row.get(5)?,
                })
            },
        )
    }

    /// Five independent sub-results for one state: transactions by
    /// period and type, brand mix by year, district performance joined
    /// with engagement, insurance adoption by year, and top pincodes
    /// joined across transaction and user leaderboards. Outer joins —
    /// missing engagement or user rows yield `None`.
    pub fn comprehensive_state_report(&self, state: &str) -> InsightsResult<StateReport> {
        let transactions = self.store.query_rows(
            "SELECT
                year,
                quarter,
                transaction_type,
                SUM(transaction_count) AS transactions,
                SUM(transaction_amount) AS amount,
                AVG(transaction_amount) AS avg_amount
             FROM aggregated_transaction
             WHERE state = ?1
             GROUP BY year, quarter, transaction_type
             ORDER BY year, quarter, amount DESC",
            params![state],
            |row| {
                Ok(StateReportTransactions {
                    year: row.get(0)?,
                    quarter: row.get(1)?,
                    transaction_type: row.get(2)?,
                    transactions: row.get(3)?,
                    amount: row.get(4)?,
                    avg_amount: row.get(5)?,
                })
            },
        )?;

        let brands = self.store.query_rows(
            "SELECT
                year,
                brands,
                SUM(count) AS total_users,
                AVG(percentage) AS avg_percentage,
                MIN(percentage) AS min_percentage,
                MAX(percentage) AS max_percentage
             FROM aggregated_user
             WHERE state = ?1
             GROUP BY year, brands
             ORDER BY year, total_users DESC",
            params![state],
            |row| {
                Ok(StateReportBrands {
                    year: row.get(0)?,
                    brand: row.get(1)?,
                    total_users: row.get(2)?,
                    avg_percentage: row.get(3)?,
                    min_percentage: row.get(4)?,
                    max_percentage: row.get(5)?,
                })
            },
        )?;

        let districts = self.store.query_rows(
            "SELECT
                mt.district,
                SUM(mt.count) AS total_transactions,
                SUM(mt.amount) AS total_amount,
                AVG(mt.amount) AS avg_amount,
                SUM(mu.registered_users) AS total_users,
                SUM(mu.app_opens) AS total_app_opens,
                ROUND(AVG(CAST(mu.app_opens AS REAL) / NULLIF(mu.registered_users, 0)), 2)
                    AS avg_opens_per_user
             FROM map_transaction mt
             LEFT JOIN map_user mu
               ON mt.state = mu.state AND mt.district = mu.district
              AND mt.year = mu.year AND mt.quarter = mu.quarter
             WHERE mt.state = ?1
             GROUP BY mt.district
             ORDER BY total_amount DESC",
            params![state],
            |row| {
                Ok(StateReportDistricts {
                    district: row.get(0)?,
                    total_transactions: row.get(1)?,
                    total_amount: row.get(2)?,
                    avg_amount: row.get(3)?,
                    total_users: row.get(4)?,
                    total_app_opens: row.get(5)?,
                    avg_opens_per_user: row.get(6)?,
                })
            },
        )?;

        let insurance = self.store.query_rows(
            "SELECT
                year,
                insurance_type,
                SUM(insurance_count) AS policies,
                SUM(insurance_amount) AS premium,
                AVG(insurance_amount) AS avg_premium
             FROM aggregated_insurance
             WHERE state = ?1
             GROUP BY year, insurance_type
             ORDER BY year, premium DESC",
            params![state],
            |row| {
                Ok(StateReportInsurance {
                    year: row.get(0)?,
                    insurance_type: row.get(1)?,
                    policies: row.get(2)?,
                    premium: row.get(3)?,
                    avg_premium: row.get(4)?,
                })
            },
        )?;

        let top_pincodes = self.store.query_rows(
            "SELECT
                tt.pincode,
                SUM(tt.transaction_count) AS total_transactions,
                SUM(tt.transaction_amount) AS total_amount,
                SUM(tu.registered_users) AS total_users
             FROM top_transaction tt
             LEFT JOIN top_user tu
               ON tt.state = tu.state AND tt.pincode = tu.pincode
              AND tt.year = tu.year AND tt.quarter = tu.quarter
             WHERE tt.state = ?1
             GROUP BY tt.pincode
             ORDER BY total_amount DESC
             LIMIT 10",
            params![state],
            |row| {
                Ok(StateReportPincodes {
                    pincode: row.get(0)?,
                    total_transactions: row.get(1)?,
                    total_amount: row.get(2)?,
                    total_users: row.get(3)?,
                })
            },
        )?;

        Ok(StateReport {
            transactions,
            brands,
            districts,
            insurance,
            top_pincodes,
        })
    }

    /// One wide row per (state, year, quarter) joining transaction,
    /// user, insurance, and map-level measures. Each source is
    /// pre-aggregated to the key before the outer joins so a source with
    /// several rows per key cannot inflate another source's sums. The
    /// correlation itself is computed downstream, not here.
    pub fn correlation_dataset(&self) -> InsightsResult<Vec<CorrelationRow>> {
        self.store.query_rows(
            "SELECT
                t.state,
                t.year,
                t.quarter,
                t.transaction_amount,
                t.transaction_count,
                u.avg_user_count,
                i.insurance_amount,
                m.registered_users,
                m.app_opens
             FROM (
                SELECT state, year, quarter,
                       SUM(transaction_amount) AS transaction_amount,
                       SUM(transaction_count) AS transaction_count
                FROM aggregated_transaction
                GROUP BY state, year, quarter
             ) t
             LEFT JOIN (
                SELECT state, year, quarter, AVG(count) AS avg_user_count
                FROM aggregated_user
                GROUP BY state, year, quarter
             ) u ON t.state = u.state AND t.year = u.year AND t.quarter = u.quarter
             LEFT JOIN (
                SELECT state, year, quarter, SUM(insurance_amount) AS insurance_amount
                FROM aggregated_insurance
                GROUP BY state, year, quarter
             ) i ON t.state = i.state AND t.year = i.year AND t.quarter = i.quarter
             LEFT JOIN (
                SELECT state, year, quarter,
                       SUM(registered_users) AS registered_users,
                       SUM(app_opens) AS app_opens
                FROM map_user
                GROUP BY state, year, quarter
             ) m ON t.state = m.state AND t.year = m.year AND t.quarter = m.quarter
             ORDER BY t.state, t.year, t.quarter",
            [],
            |row| {
                Ok(CorrelationRow {
                    state: row.get(0)?,
                    year: row.get(1)?,
                    quarter: row.get(2)?,
                    transaction_amount: row.get(3)?,
                    transaction_count: row.get(4)?,
                    avg_user_count: row.get(5)?,
                    insurance_amount: row.get(6)?,
                    registered_users: row.get(7)?,
                    app_opens: row.get(8)?,
                })
            },
        )
    }

    /// Three independently computed scalar groups merged into one struct.
    pub fn advanced_kpis(&self) -> InsightsResult<AdvancedKpis> {
        let (avg_daily_transactions, avg_daily_amount) = self.store.query_row(
            "SELECT
                AVG(daily_count) AS avg_daily_transactions,
                AVG(daily_amount) AS avg_daily_amount
             FROM (
                SELECT
                    SUM(transaction_count) * 1.0 /
                        (CASE quarter WHEN 1 THEN 90 WHEN 2 THEN 91 WHEN 3 THEN 92 ELSE 92 END)
                        AS daily_count,
                    SUM(transaction_amount) /
                        (CASE quarter WHEN 1 THEN 90 WHEN 2 THEN 91 WHEN 3 THEN 92 ELSE 92 END)
                        AS daily_amount
                FROM aggregated_transaction
                GROUP BY state, year, quarter
             )",
            [],
            |row| Ok((row.get::<_, Option<f64>>(0)?, row.get::<_, Option<f64>>(1)?)),
        )?;

        // Penetration against a fixed assumed addressable population of
        // 1,000,000 users per state.
        let (total_states, avg_user_penetration) = self.store.query_row(
            "SELECT
                COUNT(DISTINCT state) AS total_states,
                AVG(user_penetration) AS avg_user_penetration
             FROM (
                SELECT state, SUM(registered_users) * 100.0 / 1000000 AS user_penetration
                FROM map_user
                GROUP BY state
             )",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<f64>>(1)?)),
        )?;

        let avg_customer_lifetime_value = self.store.query_row(
            "SELECT AVG(customer_value) AS avg_customer_lifetime_value
             FROM (
                SELECT t.state, t.total_amount / NULLIF(u.total_users, 0) AS customer_value
                FROM (
                    SELECT state, SUM(transaction_amount) AS total_amount
                    FROM aggregated_transaction
                    GROUP BY state
                ) t
                JOIN (
                    SELECT state, SUM(registered_users) AS total_users
                    FROM map_user
                    GROUP BY state
                ) u ON t.state = u.state
             )",
            [],
            |row| row.get::<_, Option<f64>>(0),
        )?;

        Ok(AdvancedKpis {
            avg_daily_transactions,
            avg_daily_amount,
            total_states,
            avg_user_penetration,
            avg_customer_lifetime_value,
        })
    }

    /// Per-state ranks on four measures, averaged into an overall score
    /// (lower is better). Equal measure values share a rank; the final
    /// ordering breaks score ties lexically by state name.
    pub fn competitive_ranking(&self) -> InsightsResult<Vec<CompetitiveRanking>> {
        self.store.query_rows(
            "WITH state_metrics AS (
                SELECT
                    state,
                    SUM(transaction_amount) AS total_amount,
                    SUM(transaction_count) AS total_transactions,
                    COUNT(DISTINCT transaction_type) AS transaction_diversity,
                    AVG(transaction_amount) AS avg_transaction_size
                FROM aggregated_transaction
                GROUP BY state
            ),
            ranked_metrics AS (
                SELECT
                    state,
                    total_amount,
                    total_transactions,
                    transaction_diversity,
                    avg_transaction_size,
                    RANK() OVER (ORDER BY total_amount DESC) AS amount_rank,
                    RANK() OVER (ORDER BY total_transactions DESC) AS volume_rank,
                    RANK() OVER (ORDER BY transaction_diversity DESC) AS diversity_rank,
                    RANK() OVER (ORDER BY avg_transaction_size DESC) AS size_rank
                FROM state_metrics
            )
            SELECT
                state,
                total_amount,
                total_transactions,
                transaction_diversity,
                avg_transaction_size,
                amount_rank,
                volume_rank,
                diversity_rank,
                size_rank,
                ROUND((amount_rank + volume_rank + diversity_rank + size_rank) / 4.0, 2)
                    AS overall_score
            FROM ranked_metrics
            ORDER BY overall_score ASC, state ASC",
            [],
            |row| {
                Ok(CompetitiveRanking {
                    state: row.get(0)?,
                    total_amount: row.get(1)?,
                    total_transactions: row.get(2)?,
                    transaction_diversity: row.get(3)?,
                    avg_transaction_size: row.get(4)?,
                    amount_rank: row.get(5)?,
                    volume_rank: row.get(6)?,
                    diversity_rank: row.get(7)?,
                    size_rank: row.get(8)?,
                    overall_score: row.get(9)?,
                })
            },
        )
    }

    /// Deviation-based risk flags per (state, transaction_type):
    /// High Risk when max > 3x avg, Medium Risk when max > 2x avg.
    pub fn fraud_risk_indicators(&self) -> InsightsResult<Vec<FraudRiskIndicator>> {
        self.store.query_rows(
            "WITH transaction_stats AS (
                SELECT
                    state,
                    transaction_type,
                    AVG(transaction_amount) AS avg_amount,
                    MAX(transaction_amount) AS max_amount,
                    MIN(transaction_amount) AS min_amount,
                    COUNT(*) AS transaction_frequency
                FROM aggregated_transaction
                GROUP BY state, transaction_type
            )
            SELECT
                state,
                transaction_type,
                avg_amount,
                max_amount,
                min_amount,
                transaction_frequency,
                CASE
                    WHEN max_amount > avg_amount * 3 THEN 'High Risk'
                    WHEN max_amount > avg_amount * 2 THEN 'Medium Risk'
                    ELSE 'Low Risk'
                END AS risk_level,
                ROUND((max_amount - avg_amount) / NULLIF(avg_amount, 0) * 100, 2)
                    AS deviation_percentage
            FROM transaction_stats
            ORDER BY deviation_percentage DESC",
            [],
            |row| {
                Ok(FraudRiskIndicator {
                    state: row.get(0)?,
                    transaction_type: row.get(1)?,
                    avg_amount: row.get(2)?,
                    max_amount: row.get(3)?,
                    min_amount: row.get(4)?,
                    transaction_frequency: row.get(5)?,
                    risk_level: row.get(6)?,
                    deviation_percentage: row.get(7)?,
                })
            },
        )
    }
}
