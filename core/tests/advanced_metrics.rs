use paypulse_core::facts::{DistrictUserFact, TransactionFact};
use paypulse_core::{AdvancedMetrics, FactStore};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn txn(state: &str, year: i64, quarter: i64, amount: f64) -> TransactionFact {
    TransactionFact {
        state: state.into(),
        year,
        quarter,
        transaction_type: "Merchant payments".into(),
        transaction_count: 100,
        transaction_amount: amount,
    }
}

fn map_user(state: &str, year: i64, quarter: i64, users: i64, opens: i64) -> DistrictUserFact {
    DistrictUserFact {
        state: state.into(),
        year,
        quarter,
        district: "North".into(),
        registered_users: users,
        app_opens: opens,
    }
}

fn fresh_store() -> FactStore {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The linear time index is (year - 1) * 4 + quarter and the series is
/// ordered by it.
#[test]
fn time_series_index_is_linear_in_quarters() {
    let store = fresh_store();
    store
        .insert_transaction_facts(&[
            txn("Alpha", 2020, 2, 500.0),
            txn("Alpha", 2020, 1, 300.0),
            txn("Beta", 2020, 1, 999.0),
        ])
        .unwrap();

    let series = AdvancedMetrics::new(&store)
        .time_series_prep("Alpha")
        .unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].time_period, (2020 - 1) * 4 + 1);
    assert_eq!(series[1].time_period, (2020 - 1) * 4 + 2);
    assert_eq!(series[1].time_period - series[0].time_period, 1);
    assert_eq!(series[0].amount, 300.0);
}

/// Two states first active in the same quarter form one cohort; the
/// period_number counts quarters since that first activity.
#[test]
fn cohort_groups_states_by_first_active_period() {
    let store = fresh_store();
    store
        .insert_district_user_facts(&[
            map_user("Alpha", 2020, 1, 100, 500),
            map_user("Beta", 2020, 1, 200, 800),
            map_user("Alpha", 2020, 2, 150, 600),
        ])
        .unwrap();

    let rows = AdvancedMetrics::new(&store).cohort_analysis().unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].period_number, 0);
    assert_eq!(rows[0].cohort_size, 2);
    assert_eq!(rows[0].total_users, 300);
    assert_eq!(rows[1].period_number, 1);
    assert_eq!(rows[1].cohort_size, 1);
    assert_eq!(rows[1].total_users, 150);
}

/// A later-starting state forms its own cohort with its own first_period.
#[test]
fn late_state_starts_new_cohort() {
    let store = fresh_store();
    store
        .insert_district_user_facts(&[
            map_user("Alpha", 2020, 1, 100, 500),
            map_user("Beta", 2020, 3, 200, 800),
        ])
        .unwrap();

    let rows = AdvancedMetrics::new(&store).cohort_analysis().unwrap();

    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].first_period, rows[1].first_period);
    assert_eq!(rows[1].period_number, 0);
}

/// One quarter at 1000 against three at 100 deviates from the mean of
/// 325 by a factor above two, so exactly that quarter flags as an
/// anomaly and sorts first.
#[test]
fn outlier_quarter_flags_as_anomaly() {
    let store = fresh_store();
    store
        .insert_transaction_facts(&[
            txn("Alpha", 2020, 1, 100.0),
            txn("Alpha", 2020, 2, 100.0),
            txn("Alpha", 2020, 3, 100.0),
            txn("Alpha", 2020, 4, 1000.0),
        ])
        .unwrap();

    let rows = AdvancedMetrics::new(&store).anomaly_detection().unwrap();

    assert_eq!(rows.len(), 4);
    let anomalies: Vec<_> = rows.iter().filter(|r| r.anomaly_flag == "Anomaly").collect();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].quarter, 4);
    assert_eq!(rows[0].anomaly_flag, "Anomaly");
    assert!(rows[0].amount_deviation_percent.unwrap() > 200.0);
}

/// Uniform quarters never flag.
#[test]
fn uniform_series_is_all_normal() {
    let store = fresh_store();
    store
        .insert_transaction_facts(&[
            txn("Alpha", 2020, 1, 500.0),
            txn("Alpha", 2020, 2, 500.0),
            txn("Alpha", 2020, 3, 500.0),
        ])
        .unwrap();

    let rows = AdvancedMetrics::new(&store).anomaly_detection().unwrap();

    assert!(rows.iter().all(|r| r.anomaly_flag == "Normal"));
    assert!(rows
        .iter()
        .all(|r| r.amount_deviation_percent == Some(0.0)));
}
