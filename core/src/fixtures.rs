//! Synthetic fixture data for the nine fact tables.
//!
//! Mirrors the shape of published UPI pulse data: per-state quarterly
//! aggregates, district-level map data for five large states, and
//! pincode-level leaderboards. All draws are deterministic per master
//! seed — same seed, same dataset, row for row.

use crate::error::InsightsResult;
use crate::facts::{
    DistrictInsuranceFact, DistrictTransactionFact, DistrictUserFact, InsuranceFact,
    PincodeInsuranceFact, PincodeTransactionFact, PincodeUserFact, TransactionFact, UserFact,
};
use crate::rng::{FactStream, RngBank, StreamRng};
use crate::store::FactStore;
use crate::types::{Quarter, Year};

pub const STATES: [&str; 36] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Chandigarh",
    "Dadra and Nagar Haveli",
    "Daman and Diu",
    "Lakshadweep",
    "Puducherry",
];

pub const TRANSACTION_TYPES: [&str; 5] = [
    "Peer-to-peer payments",
    "Merchant payments",
    "Financial Services",
    "Recharge & bill payments",
    "Others",
];

pub const INSURANCE_TYPES: [&str; 5] = [
    "Life Insurance",
    "Health Insurance",
    "Vehicle Insurance",
    "Travel Insurance",
    "Property Insurance",
];

pub const BRANDS: [&str; 11] = [
    "Samsung", "Xiaomi", "Vivo", "Oppo", "OnePlus", "Realme", "Apple", "Huawei", "Motorola",
    "Nokia", "Others",
];

/// States with district-level map coverage, and their districts.
pub const DISTRICTS: [(&str, [&str; 5]); 5] = [
    (
        "Maharashtra",
        ["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad"],
    ),
    (
        "Karnataka",
        ["Bangalore", "Mysore", "Hubli", "Mangalore", "Belgaum"],
    ),
    (
        "Tamil Nadu",
        ["Chennai", "Coimbatore", "Madurai", "Salem", "Tiruchirappalli"],
    ),
    (
        "Gujarat",
        ["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar"],
    ),
    (
        "Rajasthan",
        ["Jaipur", "Jodhpur", "Udaipur", "Kota", "Bikaner"],
    ),
];

pub const YEARS: [Year; 7] = [2018, 2019, 2020, 2021, 2022, 2023, 2024];
pub const QUARTERS: [Quarter; 4] = [1, 2, 3, 4];

/// Row counts per fact table.
#[derive(Debug, Clone)]
pub struct FixtureConfig {
    pub aggregated_transaction_rows: usize,
    pub aggregated_user_rows: usize,
    pub aggregated_insurance_rows: usize,
    pub map_transaction_rows: usize,
    pub map_user_rows: usize,
    pub map_insurance_rows: usize,
    pub top_transaction_rows: usize,
    pub top_user_rows: usize,
    pub top_insurance_rows: usize,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            aggregated_transaction_rows: 1500,
            aggregated_user_rows: 1200,
            aggregated_insurance_rows: 800,
            map_transaction_rows: 1500,
            map_user_rows: 1200,
            map_insurance_rows: 1000,
            top_transaction_rows: 1200,
            top_user_rows: 1000,
            top_insurance_rows: 800,
        }
    }
}

/// One full synthetic dataset, ready to bulk-load.
#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub aggregated_transaction: Vec<TransactionFact>,
    pub aggregated_user: Vec<UserFact>,
    pub aggregated_insurance: Vec<InsuranceFact>,
    pub map_transaction: Vec<DistrictTransactionFact>,
    pub map_user: Vec<DistrictUserFact>,
    pub map_insurance: Vec<DistrictInsuranceFact>,
    pub top_transaction: Vec<PincodeTransactionFact>,
    pub top_user: Vec<PincodeUserFact>,
    pub top_insurance: Vec<PincodeInsuranceFact>,
}

pub struct FixtureGenerator {
    rng_bank: RngBank,
    config: FixtureConfig,
}

impl FixtureGenerator {
    pub fn new(master_seed: u64) -> Self {
        Self::with_config(master_seed, FixtureConfig::default())
    }

    pub fn with_config(master_seed: u64, config: FixtureConfig) -> Self {
        Self {
            rng_bank: RngBank::new(master_seed),
            config,
        }
    }

    pub fn generate(&self) -> FixtureSet {
        FixtureSet {
            aggregated_transaction: self.transaction_facts(),
            aggregated_user: self.user_facts(),
            aggregated_insurance: self.insurance_facts(),
            map_transaction: self.district_transaction_facts(),
            map_user: self.district_user_facts(),
            map_insurance: self.district_insurance_facts(),
            top_transaction: self.pincode_transaction_facts(),
            top_user: self.pincode_user_facts(),
            top_insurance: self.pincode_insurance_facts(),
        }
    }

    fn transaction_facts(&self) -> Vec<TransactionFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::AggregatedTransaction);
        (0..self.config.aggregated_transaction_rows)
            .map(|_| TransactionFact {
                state: rng.pick(&STATES).to_string(),
                year: *rng.pick(&YEARS),
                quarter: *rng.pick(&QUARTERS),
                transaction_type: rng.pick(&TRANSACTION_TYPES).to_string(),
                transaction_count: rng.int_in(1_000, 100_000),
                transaction_amount: rng.uniform_in(10_000.0, 10_000_000.0),
            })
            .collect()
    }

    fn user_facts(&self) -> Vec<UserFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::AggregatedUser);
        (0..self.config.aggregated_user_rows)
            .map(|_| UserFact {
                state: rng.pick(&STATES).to_string(),
                year: *rng.pick(&YEARS),
                quarter: *rng.pick(&QUARTERS),
                brand: rng.pick(&BRANDS).to_string(),
                count: rng.int_in(100, 50_000),
                percentage: rng.uniform_in(1.0, 25.0),
            })
            .collect()
    }

    fn insurance_facts(&self) -> Vec<InsuranceFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::AggregatedInsurance);
        (0..self.config.aggregated_insurance_rows)
            .map(|_| InsuranceFact {
                state: rng.pick(&STATES).to_string(),
                year: *rng.pick(&YEARS),
                quarter: *rng.pick(&QUARTERS),
                insurance_type: rng.pick(&INSURANCE_TYPES).to_string(),
                insurance_count: rng.int_in(50, 10_000),
                insurance_amount: rng.uniform_in(5_000.0, 5_000_000.0),
            })
            .collect()
    }

    fn district_transaction_facts(&self) -> Vec<DistrictTransactionFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::MapTransaction);
        (0..self.config.map_transaction_rows)
            .map(|_| {
                let (state, district) = pick_district(&mut rng);
                DistrictTransactionFact {
                    state,
                    year: *rng.pick(&YEARS),
                    quarter: *rng.pick(&QUARTERS),
                    district,
                    count: rng.int_in(500, 50_000),
                    amount: rng.uniform_in(25_000.0, 2_500_000.0),
                }
            })
            .collect()
    }

    fn district_user_facts(&self) -> Vec<DistrictUserFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::MapUser);
        (0..self.config.map_user_rows)
            .map(|_| {
                let (state, district) = pick_district(&mut rng);
                DistrictUserFact {
                    state,
                    year: *rng.pick(&YEARS),
                    quarter: *rng.pick(&QUARTERS),
                    district,
                    registered_users: rng.int_in(1_000, 100_000),
                    app_opens: rng.int_in(5_000, 500_000),
                }
            })
            .collect()
    }

    fn district_insurance_facts(&self) -> Vec<DistrictInsuranceFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::MapInsurance);
        (0..self.config.map_insurance_rows)
            .map(|_| {
                let (state, district) = pick_district(&mut rng);
                DistrictInsuranceFact {
                    state,
                    year: *rng.pick(&YEARS),
                    quarter: *rng.pick(&QUARTERS),
                    district,
                    insurance_count: rng.int_in(100, 5_000),
                    insurance_amount: rng.uniform_in(10_000.0, 1_000_000.0),
                }
            })
            .collect()
    }

    fn pincode_transaction_facts(&self) -> Vec<PincodeTransactionFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::TopTransaction);
        (0..self.config.top_transaction_rows)
            .map(|_| PincodeTransactionFact {
                state: rng.pick(&STATES).to_string(),
                year: *rng.pick(&YEARS),
                quarter: *rng.pick(&QUARTERS),
                pincode: pincode(&mut rng),
                transaction_count: rng.int_in(100, 10_000),
                transaction_amount: rng.uniform_in(5_000.0, 500_000.0),
            })
            .collect()
    }

    fn pincode_user_facts(&self) -> Vec<PincodeUserFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::TopUser);
        (0..self.config.top_user_rows)
            .map(|_| PincodeUserFact {
                state: rng.pick(&STATES).to_string(),
                year: *rng.pick(&YEARS),
                quarter: *rng.pick(&QUARTERS),
                pincode: pincode(&mut rng),
                registered_users: rng.int_in(500, 25_000),
            })
            .collect()
    }

    fn pincode_insurance_facts(&self) -> Vec<PincodeInsuranceFact> {
        let mut rng = self.rng_bank.for_stream(FactStream::TopInsurance);
        (0..self.config.top_insurance_rows)
            .map(|_| PincodeInsuranceFact {
                state: rng.pick(&STATES).to_string(),
                year: *rng.pick(&YEARS),
                quarter: *rng.pick(&QUARTERS),
                pincode: pincode(&mut rng),
                insurance_count: rng.int_in(50, 2_000),
                insurance_amount: rng.uniform_in(2_500.0, 250_000.0),
            })
            .collect()
    }
}

fn pick_district(rng: &mut StreamRng) -> (String, String) {
    let (state, districts) = *rng.pick(&DISTRICTS);
    let district = *rng.pick(&districts);
    (state.to_string(), district.to_string())
}

fn pincode(rng: &mut StreamRng) -> String {
    rng.int_in(100_000, 999_999).to_string()
}

/// Bulk-load a full fixture set into the store.
pub fn load_fixtures(store: &FactStore, set: &FixtureSet) -> InsightsResult<()> {
    store.insert_transaction_facts(&set.aggregated_transaction)?;
    store.insert_user_facts(&set.aggregated_user)?;
    store.insert_insurance_facts(&set.aggregated_insurance)?;
    store.insert_district_transaction_facts(&set.map_transaction)?;
    store.insert_district_user_facts(&set.map_user)?;
    store.insert_district_insurance_facts(&set.map_insurance)?;
    store.insert_pincode_transaction_facts(&set.top_transaction)?;
    store.insert_pincode_user_facts(&set.top_user)?;
    store.insert_pincode_insurance_facts(&set.top_insurance)?;
    Ok(())
}
