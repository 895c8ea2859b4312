use paypulse_core::facts::{
    DistrictTransactionFact, DistrictUserFact, InsuranceFact, PincodeTransactionFact,
    PincodeUserFact, TransactionFact, UserFact,
};
use paypulse_core::{FactStore, MetricsCatalog};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn fresh_store() -> FactStore {
    let store = FactStore::in_memory().unwrap();
    store.migrate().unwrap();
    store
}

fn seed_state(store: &FactStore, state: &str) {
    store
        .insert_transaction_facts(&[TransactionFact {
            state: state.into(),
            year: 2023,
            quarter: 1,
            transaction_type: "Merchant payments".into(),
            transaction_count: 100,
            transaction_amount: 5000.0,
        }])
        .unwrap();
    store
        .insert_user_facts(&[UserFact {
            state: state.into(),
            year: 2023,
            quarter: 1,
            brand: "Samsung".into(),
            count: 400,
            percentage: 12.5,
        }])
        .unwrap();
    store
        .insert_insurance_facts(&[InsuranceFact {
            state: state.into(),
            year: 2023,
            quarter: 1,
            insurance_type: "Health".into(),
            insurance_count: 10,
            insurance_amount: 800.0,
        }])
        .unwrap();
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// The report filters every sub-result to the requested state.
#[test]
fn report_is_scoped_to_state() {
    let store = fresh_store();
    seed_state(&store, "Alpha");
    seed_state(&store, "Beta");

    let report = MetricsCatalog::new(&store)
        .comprehensive_state_report("Alpha")
        .unwrap();

    assert_eq!(report.transactions.len(), 1);
    assert_eq!(report.transactions[0].amount, 5000.0);
    assert_eq!(report.brands.len(), 1);
    assert_eq!(report.brands[0].brand, "Samsung");
    assert_eq!(report.insurance.len(), 1);
    assert_eq!(report.insurance[0].insurance_type, "Health");
}

/// Districts with map transactions but no engagement rows still appear,
/// with the engagement measures as None.
#[test]
fn district_join_tolerates_missing_engagement() {
    let store = fresh_store();
    store
        .insert_district_transaction_facts(&[
            DistrictTransactionFact {
                state: "Alpha".into(),
                year: 2023,
                quarter: 1,
                district: "North".into(),
                count: 100,
                amount: 700.0,
            },
            DistrictTransactionFact {
                state: "Alpha".into(),
                year: 2023,
                quarter: 1,
                district: "South".into(),
                count: 50,
                amount: 300.0,
            },
        ])
        .unwrap();
    store
        .insert_district_user_facts(&[DistrictUserFact {
            state: "Alpha".into(),
            year: 2023,
            quarter: 1,
            district: "North".into(),
            registered_users: 200,
            app_opens: 1000,
        }])
        .unwrap();

    let report = MetricsCatalog::new(&store)
        .comprehensive_state_report("Alpha")
        .unwrap();

    assert_eq!(report.districts.len(), 2);
    let north = &report.districts[0];
    assert_eq!(north.district, "North");
    assert_eq!(north.total_users, Some(200));
    assert_eq!(north.avg_opens_per_user, Some(5.0));
    let south = &report.districts[1];
    assert_eq!(south.total_users, None);
    assert_eq!(south.avg_opens_per_user, None);
}

/// Top pincodes join the user leaderboard when present and carry None
/// otherwise, ordered by transaction amount.
#[test]
fn pincode_join_tolerates_missing_users() {
    let store = fresh_store();
    store
        .insert_pincode_transaction_facts(&[
            PincodeTransactionFact {
                state: "Alpha".into(),
                year: 2023,
                quarter: 1,
                pincode: "400001".into(),
                transaction_count: 10,
                transaction_amount: 900.0,
            },
            PincodeTransactionFact {
                state: "Alpha".into(),
                year: 2023,
                quarter: 1,
                pincode: "400002".into(),
                transaction_count: 20,
                transaction_amount: 100.0,
            },
        ])
        .unwrap();
    store
        .insert_pincode_user_facts(&[PincodeUserFact {
            state: "Alpha".into(),
            year: 2023,
            quarter: 1,
            pincode: "400001".into(),
            registered_users: 5000,
        }])
        .unwrap();

    let report = MetricsCatalog::new(&store)
        .comprehensive_state_report("Alpha")
        .unwrap();

    assert_eq!(report.top_pincodes.len(), 2);
    assert_eq!(report.top_pincodes[0].pincode, "400001");
    assert_eq!(report.top_pincodes[0].total_users, Some(5000));
    assert_eq!(report.top_pincodes[1].total_users, None);
}

/// A state with no data at all yields a report of empty sections.
#[test]
fn unknown_state_yields_empty_sections() {
    let store = fresh_store();
    let report = MetricsCatalog::new(&store)
        .comprehensive_state_report("Nowhere")
        .unwrap();

    assert!(report.transactions.is_empty());
    assert!(report.brands.is_empty());
    assert!(report.districts.is_empty());
    assert!(report.insurance.is_empty());
    assert!(report.top_pincodes.is_empty());
}
