use paypulse_core::facts::{PincodeTransactionFact, PincodeUserFact};
use paypulse_core::{FactStore, MetricsCatalog, PincodeMetric, TopPincodes};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn pin_txn(state: &str, pincode: &str, quarter: i64, amount: f64) -> PincodeTransactionFact {
    PincodeTransactionFact {
        state: state.into(),
        year: 2023,
        quarter,
        pincode: pincode.into(),
        transaction_count: 10,
        transaction_amount: amount,
    }
}

fn pin_user(state: &str, pincode: &str, users: i64) -> PincodeUserFact {
    PincodeUserFact {
        state: state.into(),
        year: 2023,
        quarter: 1,
        pincode: pincode.into(),
        registered_users: users,
    }
}

fn fresh_store() -> FactStore {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The amount leaderboard groups by (state, pincode), so the same
/// pincode in two quarters is one entry with summed measures.
#[test]
fn amount_leaderboard_groups_across_quarters() {
    let store = fresh_store();
    store
        .insert_pincode_transaction_facts(&[
            pin_txn("Alpha", "400001", 1, 600.0),
            pin_txn("Alpha", "400001", 2, 400.0),
            pin_txn("Alpha", "400002", 1, 900.0),
        ])
        .unwrap();

    let result = MetricsCatalog::new(&store)
        .top_pincodes(PincodeMetric::TransactionAmount, 10)
        .unwrap();

    let TopPincodes::TransactionAmount(rows) = result else {
        panic!("expected the transaction-amount shape");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].pincode, "400001");
    assert_eq!(rows[0].total_amount, 1000.0);
    assert_eq!(rows[0].quarters_active, 2);
    assert_eq!(rows[1].pincode, "400002");
}

/// The user leaderboard orders by registered users and honors the limit.
#[test]
fn user_leaderboard_orders_and_limits() {
    let store = fresh_store();
    store
        .insert_pincode_user_facts(&[
            pin_user("Alpha", "400001", 100),
            pin_user("Alpha", "400002", 900),
            pin_user("Beta", "560001", 500),
        ])
        .unwrap();

    let result = MetricsCatalog::new(&store)
        .top_pincodes(PincodeMetric::RegisteredUsers, 2)
        .unwrap();

    let TopPincodes::RegisteredUsers(rows) = result else {
        panic!("expected the registered-users shape");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].pincode, "400002");
    assert_eq!(rows[0].total_users, 900);
    assert_eq!(rows[1].pincode, "560001");
}

/// The same pincode string under two states stays two entries.
#[test]
fn same_pincode_in_two_states_stays_separate() {
    let store = fresh_store();
    store
        .insert_pincode_transaction_facts(&[
            pin_txn("Alpha", "400001", 1, 100.0),
            pin_txn("Beta", "400001", 1, 200.0),
        ])
        .unwrap();

    let result = MetricsCatalog::new(&store)
        .top_pincodes(PincodeMetric::TransactionAmount, 10)
        .unwrap();

    let TopPincodes::TransactionAmount(rows) = result else {
        panic!("expected the transaction-amount shape");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].state, "Beta");
    assert_eq!(rows[1].state, "Alpha");
}
