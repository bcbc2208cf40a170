//! `SeaORM` entity definitions.

pub mod account_transactions;
pub mod accounts;
pub mod advisories;
pub mod advisory_acknowledgments;
pub mod cash_locations;
pub mod cash_movements;
pub mod posting_batches;
pub mod posting_legs;
pub mod sea_orm_active_enums;
pub mod teller_transactions;
