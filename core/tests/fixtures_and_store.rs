use paypulse_core::store::FACT_TABLES;
use paypulse_core::{load_fixtures, FactStore, FixtureConfig, FixtureGenerator, InsightsError};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn small_config() -> FixtureConfig {
    FixtureConfig {
        aggregated_transaction_rows: 50,
        aggregated_user_rows: 40,
        aggregated_insurance_rows: 30,
        map_transaction_rows: 50,
        map_user_rows: 40,
        map_insurance_rows: 30,
        top_transaction_rows: 40,
        top_user_rows: 30,
        top_insurance_rows: 20,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The same master seed reproduces the dataset row for row.
#[test]
fn generation_is_deterministic_per_seed() {
    let a = FixtureGenerator::with_config(1234, small_config()).generate();
    let b = FixtureGenerator::with_config(1234, small_config()).generate();

    assert_eq!(a.aggregated_transaction, b.aggregated_transaction);
    assert_eq!(a.aggregated_user, b.aggregated_user);
    assert_eq!(a.map_user, b.map_user);
    assert_eq!(a.top_insurance, b.top_insurance);
}

/// Different seeds diverge.
#[test]
fn different_seeds_diverge() {
    let a = FixtureGenerator::with_config(1, small_config()).generate();
    let b = FixtureGenerator::with_config(2, small_config()).generate();

    assert_ne!(a.aggregated_transaction, b.aggregated_transaction);
}

/// Generated values stay inside their configured ranges.
#[test]
fn generated_values_stay_in_range() {
    let set = FixtureGenerator::with_config(77, small_config()).generate();

    for t in &set.aggregated_transaction {
        assert!((1_000..=100_000).contains(&t.transaction_count));
        assert!(t.transaction_amount >= 10_000.0 && t.transaction_amount <= 10_000_000.0);
        assert!((2018..=2024).contains(&t.year));
        assert!((1..=4).contains(&t.quarter));
    }
    for u in &set.map_user {
        assert!((1_000..=100_000).contains(&u.registered_users));
        assert!((5_000..=500_000).contains(&u.app_opens));
    }
    for p in &set.top_transaction {
        assert_eq!(p.pincode.len(), 6);
        assert!(p.pincode.chars().all(|c| c.is_ascii_digit()));
    }
}

/// Loading a fixture set fills every fact table with the configured
/// row counts.
#[test]
fn load_fills_all_nine_tables() {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    let config = small_config();
    let set = FixtureGenerator::with_config(42, config.clone()).generate();
    load_fixtures(&store, &set).unwrap();

    assert_eq!(
        store.table_row_count("aggregated_transaction").unwrap(),
        config.aggregated_transaction_rows as i64
    );
    assert_eq!(
        store.table_row_count("map_insurance").unwrap(),
        config.map_insurance_rows as i64
    );
    assert_eq!(
        store.table_row_count("top_user").unwrap(),
        config.top_user_rows as i64
    );
    for table in FACT_TABLES {
        assert!(store.table_row_count(table).unwrap() > 0, "{table} empty");
    }
}

/// The administrative surface rejects table names outside the
/// whitelist before touching SQL.
#[test]
fn admin_rejects_unknown_table() {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();

    let err = store.table_row_count("sqlite_master").unwrap_err();
    assert!(matches!(
        err,
        InsightsError::UnknownTable { ref name } if name == "sqlite_master"
    ));
    assert!(store.clear_table("users; DROP TABLE x").is_err());
    assert!(store.drop_table("nope").is_err());
}

/// clear_table empties a whitelisted table, drop_table removes it.
#[test]
fn clear_and_drop_whitelisted_tables() {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    let set = FixtureGenerator::with_config(9, small_config()).generate();
    load_fixtures(&store, &set).unwrap();

    store.clear_table("top_user").unwrap();
    assert_eq!(store.table_row_count("top_user").unwrap(), 0);

    store.drop_table("top_user").unwrap();
    assert!(store.table_row_count("top_user").is_err());

    // migrate recreates dropped tables
    store.migrate().unwrap();
    assert_eq!(store.table_row_count("top_user").unwrap(), 0);
}

/// Migration is idempotent and an explicit close surfaces no error on
/// a healthy store.
#[test]
fn migrate_idempotent_and_close_clean() {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    store.migrate().unwrap();
    store.close().unwrap();
}
