//! Bulk load of typed fact rows.
//!
//! Each method inserts one table's rows inside a single transaction with
//! a prepared statement. Fact tables are append-only: there is no update
//! path, only these inserts and the administrative clear/drop.

use super::FactStore;
use crate::error::InsightsResult;
use crate::facts::{
    DistrictInsuranceFact, DistrictTransactionFact, DistrictUserFact, InsuranceFact,
    PincodeInsuranceFact, PincodeTransactionFact, PincodeUserFact, TransactionFact, UserFact,
};
use rusqlite::params;

impl FactStore {
    pub fn insert_transaction_facts(&self, rows: &[TransactionFact]) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO aggregated_transaction
                    (state, year, quarter, transaction_type, transaction_count, transaction_amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.transaction_type,
                    r.transaction_count,
                    r.transaction_amount,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into aggregated_transaction", rows.len());
        Ok(rows.len())
    }

    pub fn insert_user_facts(&self, rows: &[UserFact]) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO aggregated_user (state, year, quarter, brands, count, percentage)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.brand,
                    r.count,
                    r.percentage,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into aggregated_user", rows.len());
        Ok(rows.len())
    }

    pub fn insert_insurance_facts(&self, rows: &[InsuranceFact]) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO aggregated_insurance
                    (state, year, quarter, insurance_type, insurance_count, insurance_amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.insurance_type,
                    r.insurance_count,
                    r.insurance_amount,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into aggregated_insurance", rows.len());
        Ok(rows.len())
    }

    pub fn insert_district_transaction_facts(
        &self,
        rows: &[DistrictTransactionFact],
    ) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO map_transaction (state, year, quarter, district, count, amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state, r.year, r.quarter, r.district, r.count, r.amount,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into map_transaction", rows.len());
        Ok(rows.len())
    }

    pub fn insert_district_user_facts(&self, rows: &[DistrictUserFact]) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO map_user (state, year, quarter, district, registered_users, app_opens)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.district,
                    r.registered_users,
                    r.app_opens,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into map_user", rows.len());
        Ok(rows.len())
    }

    pub fn insert_district_insurance_facts(
        &self,
        rows: &[DistrictInsuranceFact],
    ) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO map_insurance
                    (state, year, quarter, district, insurance_count, insurance_amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.district,
                    r.insurance_count,
                    r.insurance_amount,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into map_insurance", rows.len());
        Ok(rows.len())
    }

    pub fn insert_pincode_transaction_facts(
        &self,
        rows: &[PincodeTransactionFact],
    ) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO top_transaction
                    (state, year, quarter, pincode, transaction_count, transaction_amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.pincode,
                    r.transaction_count,
                    r.transaction_amount,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into top_transaction", rows.len());
        Ok(rows.len())
    }

    pub fn insert_pincode_user_facts(&self, rows: &[PincodeUserFact]) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO top_user (state, year, quarter, pincode, registered_users)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.pincode,
                    r.registered_users,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into top_user", rows.len());
        Ok(rows.len())
    }

    pub fn insert_pincode_insurance_facts(
        &self,
        rows: &[PincodeInsuranceFact],
    ) -> InsightsResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO top_insurance
                    (state, year, quarter, pincode, insurance_count, insurance_amount)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for r in rows {
                stmt.execute(params![
                    r.state,
                    r.year,
                    r.quarter,
                    r.pincode,
                    r.insurance_count,
                    r.insurance_amount,
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loaded {} rows into top_insurance", rows.len());
        Ok(rows.len())
    }
}
