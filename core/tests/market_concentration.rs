use paypulse_core::facts::TransactionFact;
use paypulse_core::{FactStore, MetricsCatalog};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn txn(state: &str, amount: f64) -> TransactionFact {
    TransactionFact {
        state: state.into(),
        year: 2023,
        quarter: 1,
        transaction_type: "Merchant payments".into(),
        transaction_count: 100,
        transaction_amount: amount,
    }
}

fn store_with(rows: Vec<TransactionFact>) -> FactStore {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    store.insert_transaction_facts(&rows).unwrap();
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Equal totals rank deterministically in state-name order, cumulative
/// share rises monotonically, and the last row lands at 100%.
#[test]
fn tie_breaks_and_cumulative_share() {
    let store = store_with(vec![
        txn("Gamma", 200.0),
        txn("Beta", 400.0),
        txn("Alpha", 400.0),
    ]);
    let rows = MetricsCatalog::new(&store).market_concentration().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().map(|r| r.state.as_str()).collect::<Vec<_>>(),
        vec!["Alpha", "Beta", "Gamma"]
    );
    assert_eq!(
        rows.iter().map(|r| r.state_rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(rows[0].cumulative_percentage, Some(40.0));
    assert_eq!(rows[1].cumulative_percentage, Some(80.0));
    assert_eq!(rows[2].cumulative_percentage, Some(100.0));
}

/// Segments follow the cumulative share: at or below 80% is "Top 80%",
/// above 95% is "Bottom 5%".
#[test]
fn segment_buckets() {
    let store = store_with(vec![
        txn("Alpha", 400.0),
        txn("Beta", 400.0),
        txn("Gamma", 200.0),
    ]);
    let rows = MetricsCatalog::new(&store).market_concentration().unwrap();

    assert_eq!(rows[0].market_segment, "Top 80%");
    assert_eq!(rows[1].market_segment, "Top 80%");
    assert_eq!(rows[2].market_segment, "Bottom 5%");
}

/// Individual shares sum back to roughly 100%.
#[test]
fn individual_shares_sum_to_whole() {
    let store = store_with(vec![
        txn("Alpha", 123.0),
        txn("Beta", 456.0),
        txn("Gamma", 789.0),
        txn("Delta", 321.0),
    ]);
    let rows = MetricsCatalog::new(&store).market_concentration().unwrap();

    let total: f64 = rows.iter().filter_map(|r| r.individual_percentage).sum();
    assert!((total - 100.0).abs() < 0.1, "shares summed to {total}");
}

/// The middle band "Next 15%" appears when a state's cumulative share
/// falls between 80% and 95%.
#[test]
fn middle_band_present() {
    let store = store_with(vec![
        txn("Alpha", 750.0),
        txn("Beta", 150.0),
        txn("Gamma", 100.0),
    ]);
    let rows = MetricsCatalog::new(&store).market_concentration().unwrap();

    // cumulative: 75%, 90%, 100%
    assert_eq!(rows[0].market_segment, "Top 80%");
    assert_eq!(rows[1].market_segment, "Next 15%");
    assert_eq!(rows[2].market_segment, "Bottom 5%");
}
