//! Typed rows for the nine fact tables.
//!
//! One struct per table, carrying exactly the table's dimensions and
//! measures. The synthetic `id` primary key is assigned by SQLite on
//! insert and never surfaces here.

use crate::types::{Quarter, Year};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub transaction_type: String,
    pub transaction_count: i64,
    pub transaction_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub brand: String,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub insurance_type: String,
    pub insurance_count: i64,
    pub insurance_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictTransactionFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub district: String,
    pub count: i64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictUserFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub district: String,
    pub registered_users: i64,
    pub app_opens: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictInsuranceFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub district: String,
    pub insurance_count: i64,
    pub insurance_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PincodeTransactionFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub pincode: String,
    pub transaction_count: i64,
    pub transaction_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PincodeUserFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub pincode: String,
    pub registered_users: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PincodeInsuranceFact {
    pub state: String,
    pub year: Year,
    pub quarter: Quarter,
    pub pincode: String,
    pub insurance_count: i64,
    pub insurance_amount: f64,
}
